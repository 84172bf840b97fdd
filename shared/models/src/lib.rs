//! # Estoque Core Domain Models
//!
//! Domain types for the inventory analysis dashboard. Every type derives serde
//! so the presenter can hand it to a JSON client unchanged.
//!
//! ## Key Models
//!
//! - **InventoryRecord**: one row of the stock report (product, manufacturer,
//!   quantities, unit cost, last purchase date)
//! - **RecordSet**: an ordered, immutable collection of records; filtering
//!   produces a new set and never touches the source
//! - **PeriodFilter**: the year / year+month narrowing applied to a set
//! - **Thresholds**: the user-adjustable limits of the threshold views
//! - **View rows**: the output rows of each aggregate view
//!
//! ## Missing values
//!
//! Blank numeric cells are carried as `NaN`. Sums skip them and comparisons
//! against them are always false, so a row with a missing quantity never lands
//! in a threshold view by accident.

pub mod period;
pub mod record;
pub mod thresholds;
pub mod views;


pub use period::*;
pub use record::*;
pub use thresholds::*;
pub use views::*;
