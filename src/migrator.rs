use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_catalog_tables::Migration),
            Box::new(m20240101_000002_create_inventory_levels_table::Migration),
            Box::new(m20240101_000003_create_stock_in_tables::Migration),
            Box::new(m20240101_000004_create_stock_out_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_catalog_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::ProductId)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(
                            ColumnDef::new(Products::StatusId)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::SupplierId)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::Phone).string())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Employees::EmployeeId)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Employees::FirstName).string().not_null())
                        .col(ColumnDef::new(Employees::LastName).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductVariations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductVariations::VariationId)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductVariations::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductVariations::VariationType).string())
                        .col(ColumnDef::new(ProductVariations::VariationValue).string())
                        .col(ColumnDef::new(ProductVariations::Sku).string().not_null())
                        // 16 is the largest precision the SQLite backend accepts
                        .col(
                            ColumnDef::new(ProductVariations::UnitPrice)
                                .decimal_len(16, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductVariations::StatusId)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_variations_product")
                                .from(ProductVariations::Table, ProductVariations::ProductId)
                                .to(Products::Table, Products::ProductId),
                        )
                        .to_owned(),
                )
                .await?;

            // SKU uniqueness was convention-only in the legacy system; the
            // index makes collisions a hard error.
            manager
                .create_index(
                    Index::create()
                        .name("idx_product_variations_sku")
                        .table(ProductVariations::Table)
                        .col(ProductVariations::Sku)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductVariations::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Employees::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Products {
        Table,
        ProductId,
        Name,
        StatusId,
    }

    #[derive(Iden)]
    pub(super) enum Suppliers {
        Table,
        SupplierId,
        Name,
        Phone,
    }

    #[derive(Iden)]
    pub(super) enum Employees {
        Table,
        EmployeeId,
        FirstName,
        LastName,
    }

    #[derive(Iden)]
    pub(super) enum ProductVariations {
        Table,
        VariationId,
        ProductId,
        VariationType,
        VariationValue,
        Sku,
        UnitPrice,
        StatusId,
    }
}

mod m20240101_000002_create_inventory_levels_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_catalog_tables::ProductVariations;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_inventory_levels_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryLevels::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryLevels::VariationId)
                                .big_integer()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryLevels::StockQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryLevels::Version)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryLevels::LastUpdatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_levels_variation")
                                .from(InventoryLevels::Table, InventoryLevels::VariationId)
                                .to(ProductVariations::Table, ProductVariations::VariationId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryLevels::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum InventoryLevels {
        Table,
        VariationId,
        StockQuantity,
        Version,
        LastUpdatedDate,
    }
}

mod m20240101_000003_create_stock_in_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_catalog_tables::{Employees, Suppliers};

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_stock_in_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockIns::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockIns::StockInId)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockIns::ReferenceNumber)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockIns::SupplierId).big_integer().not_null())
                        .col(ColumnDef::new(StockIns::EmployeeId).big_integer().not_null())
                        .col(
                            ColumnDef::new(StockIns::StockInDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockIns::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stock_ins_supplier")
                                .from(StockIns::Table, StockIns::SupplierId)
                                .to(Suppliers::Table, Suppliers::SupplierId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stock_ins_employee")
                                .from(StockIns::Table, StockIns::EmployeeId)
                                .to(Employees::Table, Employees::EmployeeId),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_stock_ins_reference_number")
                        .table(StockIns::Table)
                        .col(StockIns::ReferenceNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StockInItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockInItems::StockInItemId)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockInItems::StockInId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockInItems::VariationId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockInItems::Quantity).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stock_in_items_header")
                                .from(StockInItems::Table, StockInItems::StockInId)
                                .to(StockIns::Table, StockIns::StockInId),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_stock_in_items_variation")
                        .table(StockInItems::Table)
                        .col(StockInItems::VariationId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockInItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(StockIns::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum StockIns {
        Table,
        StockInId,
        ReferenceNumber,
        SupplierId,
        EmployeeId,
        StockInDate,
        CreatedAt,
    }

    #[derive(Iden)]
    enum StockInItems {
        Table,
        StockInItemId,
        StockInId,
        VariationId,
        Quantity,
    }
}

mod m20240101_000004_create_stock_out_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_stock_out_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockOuts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockOuts::StockOutId)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockOuts::ReferenceNumber)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockOuts::OrderTransactionId).uuid())
                        .col(
                            ColumnDef::new(StockOuts::StockOutDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockOuts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_stock_outs_reference_number")
                        .table(StockOuts::Table)
                        .col(StockOuts::ReferenceNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StockOutItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockOutItems::StockOutItemId)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockOutItems::StockOutId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockOutItems::VariationId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockOutItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(StockOutItems::Reason).text().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stock_out_items_header")
                                .from(StockOutItems::Table, StockOutItems::StockOutId)
                                .to(StockOuts::Table, StockOuts::StockOutId),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_stock_out_items_variation")
                        .table(StockOutItems::Table)
                        .col(StockOutItems::VariationId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockOutItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(StockOuts::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum StockOuts {
        Table,
        StockOutId,
        ReferenceNumber,
        OrderTransactionId,
        StockOutDate,
        CreatedAt,
    }

    #[derive(Iden)]
    enum StockOutItems {
        Table,
        StockOutItemId,
        StockOutId,
        VariationId,
        Quantity,
        Reason,
    }
}
