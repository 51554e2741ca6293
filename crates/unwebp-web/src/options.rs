//! Options accepted from JavaScript.

use serde::Deserialize;
use unwebp_core::InterceptorConfig;

/// Default console log level.
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// Options passed to `configure()`, e.g.
/// `{ pasteDelivery: "redispatch", acceptDragOver: true, logLevel: "debug" }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebOptions {
    #[serde(flatten)]
    pub config: InterceptorConfig,
    pub log_level: Option<String>,
}

impl WebOptions {
    /// The requested log level, falling back to the default when missing or
    /// unrecognized.
    pub fn log_level(&self) -> log::Level {
        match self.log_level.as_deref() {
            Some(level) => level.parse().unwrap_or_else(|_| {
                log::warn!("Unknown log level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
                DEFAULT_LOG_LEVEL
            }),
            None => DEFAULT_LOG_LEVEL,
        }
    }
}
