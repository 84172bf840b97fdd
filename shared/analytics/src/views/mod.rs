//! Aggregate views over a filtered record set.
//!
//! Each view is a pure function of the filtered set plus its own threshold,
//! if any. Sorting is stable, so ties keep the order of the source rows.

pub mod availability;
pub mod damage;
pub mod manufacturers;
pub mod overview;
pub mod stale;

pub use availability::{critical_chart, critical_products, low_availability, quantity_comparison};
pub use damage::{damage_analysis, damage_percentage};
pub use manufacturers::{
    manufacturer_performance, top_manufacturers, top_manufacturers_chart, TOP_MANUFACTURERS_LIMIT,
};
pub use overview::overview_totals;
pub use stale::stale_stock;
