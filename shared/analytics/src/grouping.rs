//! Missing-value aware sums and ordering shared by the views.

use std::cmp::Ordering;

/// Sum that skips missing values, so an all-missing column sums to 0.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Sum(f64);

impl Sum {
    pub(crate) fn add(&mut self, value: f64) {
        if !value.is_nan() {
            self.0 += value;
        }
    }

    pub(crate) fn value(self) -> f64 {
        self.0
    }
}

pub(crate) fn nan_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut sum = Sum::default();
    values.into_iter().for_each(|v| sum.add(v));
    sum.value()
}

/// Descending order for `sort_by`, with missing values last.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Missing values shown as 0 in tables that fill gaps.
pub(crate) fn fill_missing(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
