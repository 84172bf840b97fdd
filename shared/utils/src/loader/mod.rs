//! Inventory Loading Module
//!
//! Reads the stock report (CSV or Excel) into an immutable record set.

pub mod dates;
pub mod parser;

pub use dates::{excel_serial_to_date, parse_purchase_date};
pub use parser::{load_inventory, InventoryFormat, InventoryLoader, LoadedInventory, REQUIRED_COLUMNS};
