use chrono::NaiveDate;
use estoque_models::{RecordSet, StaleStockRow};

/// Stock on hand whose last purchase is more than `day_threshold` days before
/// `today`, oldest first. Records with no physical units are never stale.
pub fn stale_stock(records: &RecordSet, day_threshold: i64, today: NaiveDate) -> Vec<StaleStockRow> {
    let mut rows: Vec<StaleStockRow> = records
        .iter()
        .filter(|r| r.physical_quantity > 0.0)
        .filter_map(|r| {
            let days = r.days_since_last_purchase(today);
            (days > day_threshold).then(|| StaleStockRow {
                product: r.product.clone(),
                manufacturer: r.manufacturer.clone(),
                physical_quantity: r.physical_quantity,
                last_purchase_date: r.last_purchase_date,
                days_since_last_purchase: days,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.days_since_last_purchase.cmp(&a.days_since_last_purchase));
    rows
}
