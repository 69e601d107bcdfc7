// Monitor, DPI and overlay surface geometry

use serde::{Deserialize, Serialize};

/// Rectangle in physical pixels (virtual-screen coordinates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// An attached monitor as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    /// Stable OS device name, e.g. `\\.\DISPLAY1`.
    pub device_name: String,
    pub bounds: Rect,
    /// Usable region excluding taskbars and docks.
    pub work_area: Rect,
    pub is_primary: bool,
}

/// Device-pixels per device-independent unit, per axis (1.0 = 96 DPI).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpiScale {
    pub x: f64,
    pub y: f64,
}

impl DpiScale {
    pub const IDENTITY: DpiScale = DpiScale { x: 1.0, y: 1.0 };

    pub fn from_dpi(dpi_x: u32, dpi_y: u32) -> Self {
        Self {
            x: dpi_x as f64 / 96.0,
            y: dpi_y as f64 / 96.0,
        }
    }
}

impl Default for DpiScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What the window layer reports about the rendered overlay surface.
/// Width and height are in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMetrics {
    pub dpi: DpiScale,
    pub width: f64,
    pub height: f64,
}

/// Top-left window position in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub left: f64,
    pub top: f64,
}
