use serde::{Deserialize, Serialize};

/// Log output settings. `level` seeds the tracing filter at startup and
/// accepts full filter directives (e.g. "info,propcast_infrastructure=debug"),
/// not just a bare level; `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub level: String,

    /// Colorize terminal output (default: true)
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_filter(),
            ansi: default_ansi(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}
