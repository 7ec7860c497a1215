use serde::{Deserialize, Serialize};

/// Background job intervals
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobsConfig {
    /// Conditions pre-warm refresh interval in seconds (default: 300)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Cache sweep interval in seconds (default: 300)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_sweep_interval() -> u64 {
    300
}
