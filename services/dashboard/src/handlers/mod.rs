pub mod dashboard;
pub mod filters;
pub mod health;

pub use dashboard::*;
pub use filters::*;
pub use health::*;

/// Blank, `all` and `todos` select every period.
pub(crate) fn is_all_selection(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case("todos")
}
