//! OS bindings the engine needs: attached monitors, screen pixels for the
//! contrast check, and the system DPI scale.
//!
//! Everything here is Windows-only in substance. Other targets get stubs that
//! report [`PlatformError::Unsupported`], which the engine treats like any
//! other "skip this recompute" condition.

#[cfg(windows)]
mod windows;

use crate::contrast::{Rgb, SampleRegion, ScreenSampler};
use crate::models::{DpiScale, MonitorInfo};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{api} failed: {message}")]
    Api { api: &'static str, message: String },
    #[error("not supported on this platform")]
    Unsupported,
}

/// Enumerates attached monitors and their work areas.
pub trait DisplayProvider {
    fn monitors(&self) -> Result<Vec<MonitorInfo>, PlatformError>;
}

/// Live monitor list from the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDisplays;

impl DisplayProvider for SystemDisplays {
    fn monitors(&self) -> Result<Vec<MonitorInfo>, PlatformError> {
        #[cfg(windows)]
        {
            windows::enumerate_monitors()
        }
        #[cfg(not(windows))]
        {
            Err(PlatformError::Unsupported)
        }
    }
}

/// Reads pixels straight from the desktop.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemScreen;

impl ScreenSampler for SystemScreen {
    fn capture(&mut self, region: SampleRegion) -> Result<Vec<Rgb>, PlatformError> {
        #[cfg(windows)]
        {
            windows::capture_pixels(region)
        }
        #[cfg(not(windows))]
        {
            let _ = region;
            Err(PlatformError::Unsupported)
        }
    }
}

/// Screen sampler for this platform, if it has one.
pub fn system_screen() -> Option<Box<dyn ScreenSampler>> {
    if cfg!(windows) {
        Some(Box::new(SystemScreen))
    } else {
        None
    }
}

/// System-wide DPI scale; identity where the OS has no notion of it.
pub fn system_dpi_scale() -> DpiScale {
    #[cfg(windows)]
    {
        windows::system_dpi_scale()
    }
    #[cfg(not(windows))]
    {
        DpiScale::IDENTITY
    }
}
