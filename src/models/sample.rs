// Per-tick hardware sample

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One tick of hardware readings. Built fresh by the counter source and never
/// mutated after it is handed to the display layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSample {
    pub cpu_percent: f64,
    /// `None` when no GPU sensor could be opened ("N/A" on the HUD).
    pub gpu_percent: Option<f64>,
    pub ram_available_mb: f64,
    pub disk_read_bytes_per_sec: f64,
    pub disk_write_bytes_per_sec: f64,
    /// Drive name -> busy percent, always within [0, 100].
    #[serde(default)]
    pub disk_loads: BTreeMap<String, f64>,
    pub net_download_bytes_per_sec: f64,
    pub net_upload_bytes_per_sec: f64,
}
