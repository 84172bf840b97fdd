use estoque_utils::LoadedInventory;
use prometheus::{IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Prometheus collectors for the dashboard, kept in their own registry.
#[derive(Clone)]
pub struct DashboardMetrics {
    registry: Registry,
    records_loaded: IntGauge,
    rows_dropped: IntGauge,
    views_served: IntCounterVec,
}

impl DashboardMetrics {
    pub fn new(namespace: &str) -> prometheus::Result<Self> {
        let registry = Registry::new();

        let records_loaded = IntGauge::with_opts(
            Opts::new("records_loaded", "Inventory records available to the dashboard")
                .namespace(namespace),
        )?;
        let rows_dropped = IntGauge::with_opts(
            Opts::new("rows_dropped", "Source rows dropped for an unparseable purchase date")
                .namespace(namespace),
        )?;
        let views_served = IntCounterVec::new(
            Opts::new("views_served_total", "Dashboard views computed, by view").namespace(namespace),
            &["view"],
        )?;

        registry.register(Box::new(records_loaded.clone()))?;
        registry.register(Box::new(rows_dropped.clone()))?;
        registry.register(Box::new(views_served.clone()))?;

        Ok(Self {
            registry,
            records_loaded,
            rows_dropped,
            views_served,
        })
    }

    pub fn record_load(&self, loaded: &LoadedInventory) {
        self.records_loaded.set(loaded.records.len() as i64);
        self.rows_dropped.set(loaded.dropped_rows as i64);
    }

    pub fn view_served(&self, view: &str) {
        self.views_served.with_label_values(&[view]).inc();
    }

    pub fn encode(&self) -> prometheus::Result<String> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}
