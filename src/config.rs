use std::time::Duration;

use crate::error::{InventoryError, Result};

pub const DEFAULT_DSN: &str = "http://localhost:9200";
pub const DEFAULT_INDEX: &str = "inventory";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);

/// Threshold used by the low-stock report when the caller gives none.
pub const DEFAULT_LOW_STOCK_LEVEL: u64 = 3;

// -- Indexed field names -----------------------------------------------------

pub const FIELD_TYPE: &str = "type";
pub const FIELD_BRAND: &str = "brand";
pub const FIELD_MODEL: &str = "model";
pub const FIELD_SUPPLIER: &str = "supplier";
pub const FIELD_STOCK: &str = "stock";

/// Derived `brand name model` field targeted by free-text search.
pub const FIELD_TITLE: &str = "title";

/// Suffix of the non-analyzed subfield used for exact term matches.
pub const KEYWORD_SUFFIX: &str = ".keyword";

/// Name of the exact-match subfield for `field`, e.g. `brand.keyword`.
pub fn keyword_field(field: &str) -> String {
    format!("{}{}", field, KEYWORD_SUFFIX)
}

// ---------------------------------------------------------------------------
// InventoryConfig
// ---------------------------------------------------------------------------

/// Connection and listener settings.
///
/// Defaults point at a local Elasticsearch node. [`from_env`](Self::from_env)
/// overrides them from `DSN`, `INVENTORY_INDEX`, `REQUEST_TIMEOUT_SECS` and
/// `IP_ADDR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Base URL of the search backend, or `memory` for the in-process index.
    pub dsn: String,
    pub index: String,
    pub timeout: Duration,
    pub listen_addr: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            dsn: DEFAULT_DSN.to_string(),
            index: DEFAULT_INDEX.to_string(),
            timeout: DEFAULT_TIMEOUT,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

impl InventoryConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Unset or blank keys
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(dsn) = get("DSN") {
            config.dsn = dsn;
        }
        if let Some(index) = get("INVENTORY_INDEX") {
            config.index = index;
        }
        if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                InventoryError::Validation(format!(
                    "REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    secs
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(addr) = get("IP_ADDR") {
            // A bare port listens on every interface.
            config.listen_addr = if addr.contains(':') {
                addr
            } else {
                format!("0.0.0.0:{}", addr)
            };
        }
        Ok(config)
    }

    /// Whether the DSN selects the in-process memory index.
    pub fn is_memory(&self) -> bool {
        self.dsn.eq_ignore_ascii_case("memory")
    }
}
