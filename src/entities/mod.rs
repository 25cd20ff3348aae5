pub mod employee;
pub mod inventory_level;
pub mod product;
pub mod product_variation;
pub mod stock_in;
pub mod stock_in_item;
pub mod stock_out;
pub mod stock_out_item;
pub mod supplier;
