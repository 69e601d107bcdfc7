// Screen placement: target monitor selection and DPI-aware bottom-left anchor

use crate::config::policy::PLACEMENT_MARGIN;
use crate::models::{Anchor, DpiScale, MonitorInfo, Rect};
use tracing::debug;

/// Pick the monitor to pin the overlay on.
///
/// Exact device-name match first; a configured name that is not attached (or
/// an empty one) falls back to the primary monitor, then to whatever monitor
/// comes first. `None` only when nothing is attached.
pub fn select_monitor<'a>(monitors: &'a [MonitorInfo], device_name: &str) -> Option<&'a MonitorInfo> {
    if !device_name.is_empty() {
        if let Some(m) = monitors.iter().find(|m| m.device_name == device_name) {
            return Some(m);
        }
        debug!(
            device_name,
            attached = monitors.len(),
            "configured monitor not attached, falling back to primary"
        );
    }
    monitors
        .iter()
        .find(|m| m.is_primary)
        .or_else(|| monitors.first())
}

/// Bottom-left anchor of `work_area`, in device-independent units.
///
/// The overlay's bottom edge stays `PLACEMENT_MARGIN` above the work area
/// bottom, so growing content pushes the top edge upward.
pub fn anchor_for(work_area: Rect, dpi: DpiScale, overlay_height: f64) -> Anchor {
    let dpi_x = if dpi.x > 0.0 { dpi.x } else { 1.0 };
    let dpi_y = if dpi.y > 0.0 { dpi.y } else { 1.0 };
    Anchor {
        left: work_area.left as f64 / dpi_x + PLACEMENT_MARGIN,
        top: work_area.bottom as f64 / dpi_y - overlay_height - PLACEMENT_MARGIN,
    }
}
