//! Application configuration loaded from environment variables.

/// Storefront configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `API_BASE_URL` — order/auth backend (default: `"http://localhost:4000"`)
/// - `WHATSAPP_NUMBER` — hand-off contact (default: `"221763034401"`)
/// - `STORE_PATH` — client-side store file (default: `"macreme-store.json"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub whatsapp_number: String,
    pub store_path: String,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000".to_string()),
            whatsapp_number: std::env::var("WHATSAPP_NUMBER")
                .unwrap_or_else(|_| checkout::WHATSAPP_NUMBER.to_string()),
            store_path: std::env::var("STORE_PATH")
                .unwrap_or_else(|_| "macreme-store.json".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:4000".to_string(),
            whatsapp_number: checkout::WHATSAPP_NUMBER.to_string(),
            store_path: "macreme-store.json".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:4000");
        assert_eq!(config.whatsapp_number, "221763034401");
        assert_eq!(config.store_path, "macreme-store.json");
        assert_eq!(config.log_level, "info");
    }
}
