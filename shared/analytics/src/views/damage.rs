use estoque_models::{DamageRow, RecordSet};

use crate::grouping::{descending, fill_missing};

/// `damaged / physical * 100`, or 0 when the ratio is undefined or infinite.
pub fn damage_percentage(damaged: f64, physical: f64) -> f64 {
    let pct = damaged / physical * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// Records with damaged units, most damaged first.
pub fn damage_analysis(records: &RecordSet) -> Vec<DamageRow> {
    let mut rows: Vec<DamageRow> = records
        .iter()
        .filter(|r| r.damaged_quantity > 0.0)
        .map(|r| DamageRow {
            product: r.product.clone(),
            manufacturer: r.manufacturer.clone(),
            physical_quantity: fill_missing(r.physical_quantity),
            damaged_quantity: r.damaged_quantity,
            damage_pct: damage_percentage(r.damaged_quantity, r.physical_quantity),
        })
        .collect();

    rows.sort_by(|a, b| descending(a.damaged_quantity, b.damaged_quantity));
    rows
}
