use serde::Deserialize;

use crate::constants::{
    BONAPP_CAFE_BASE_URL, BONAPP_MENU_BASE_URL, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY_MS,
    STATION_JUNK,
};

/// Everything the fetch layer needs to know, passed in explicitly instead of
/// read from process-global state. Deserializable so hosts can keep it in a
/// JSON config next to their own settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub bonapp_menu_base_url: String,
    pub bonapp_cafe_base_url: String,
    /// Retries per individual request, after the first attempt.
    pub retries: u32,
    pub retry_delay_ms: u64,
    /// Serve the bundled static-feed dataset without touching the network.
    pub local_mode: bool,
    pub trim_rules: TrimRules,
}

impl Default for MenuConfig {
    fn default() -> Self {
        MenuConfig {
            bonapp_menu_base_url: BONAPP_MENU_BASE_URL.to_string(),
            bonapp_cafe_base_url: BONAPP_CAFE_BASE_URL.to_string(),
            retries: DEFAULT_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            local_mode: false,
            trim_rules: TrimRules::default(),
        }
    }
}

/// Junk substrings stripped from provider text before any other cleanup.
/// Upstream formatting drifts, so these are data, not code.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrimRules {
    pub station_junk: Vec<String>,
    pub label_junk: Vec<String>,
}

impl Default for TrimRules {
    fn default() -> Self {
        TrimRules {
            station_junk: STATION_JUNK.iter().map(|s| s.to_string()).collect(),
            label_junk: Vec::new(),
        }
    }
}
