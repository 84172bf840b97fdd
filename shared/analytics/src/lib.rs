//! # Estoque Analytics
//!
//! Filter engine and aggregate views over an inventory [`RecordSet`].
//!
//! The pipeline is a chain of pure transformations:
//!
//! ```text
//! load → apply_filters(period) → view(filtered, thresholds)
//! ```
//!
//! Every function borrows its input and returns a new value, so the loaded set
//! can be shared read-only between callers and every view is reproducible from
//! its arguments. Views never fail on an empty set; they return an empty result.
//!
//! [`RecordSet`]: estoque_models::RecordSet

pub mod dashboard;
pub mod filter;
mod grouping;
pub mod views;


pub use dashboard::{build_snapshot, NO_DATA_NOTICE};
pub use filter::{apply_filters, available_years, available_months, FilterState};
pub use views::*;
