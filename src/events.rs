use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Domain events emitted after a unit of work commits. Consumers must treat
/// them as notifications, not as the ledger itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    StockInRecorded {
        stock_in_id: i64,
        reference_number: String,
        stock_in_date: DateTime<Utc>,
        line_count: usize,
    },
    StockOutRecorded {
        stock_out_id: i64,
        reference_number: String,
        stock_out_date: DateTime<Utc>,
        line_count: usize,
    },
    VariationCreated {
        variation_id: i64,
        sku: String,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Event processing loop. Runs for the lifetime of the process; today it only
/// logs, but it is the hook point for notifications and downstream syncs.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::StockInRecorded {
                reference_number,
                line_count,
                ..
            } => {
                info!(
                    reference_number = %reference_number,
                    line_count = %line_count,
                    "Stock-in batch recorded"
                );
            }
            Event::StockOutRecorded {
                reference_number,
                line_count,
                ..
            } => {
                info!(
                    reference_number = %reference_number,
                    line_count = %line_count,
                    "Stock-out batch recorded"
                );
            }
            Event::VariationCreated { variation_id, sku } => {
                info!(variation_id = %variation_id, sku = %sku, "Variation created");
            }
        }
    }

    warn!("Event channel closed; event processing loop exiting");
}
