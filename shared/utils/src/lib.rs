pub mod config;
pub mod logging;
pub mod error;
pub mod validation;
pub mod format;
pub mod loader;

pub use config::*;
pub use logging::*;
pub use error::*;
pub use validation::*;
pub use format::*;
pub use loader::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data.path, "df_estoque.csv");
    }

    #[test]
    fn test_config_errors_are_configuration_errors() {
        std::env::set_var("ESTOQUE__SERVER__PORT", "not-a-port");
        let result = AppConfig::load();
        std::env::remove_var("ESTOQUE__SERVER__PORT");

        match result {
            Err(error) => assert_eq!(error.error_code(), "CONFIGURATION_ERROR"),
            Ok(config) => panic!("loaded invalid port: {}", config.server.port),
        }
    }

    #[test]
    fn test_error_handling() {
        let error = InventoryError::validation("stale_days", "out of range");
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert_eq!(error.http_status_code(), 400);
    }
}
