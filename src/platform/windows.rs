// Win32: monitor enumeration, desktop pixel sampling, system DPI.

use super::PlatformError;
use crate::contrast::{Rgb, SampleRegion};
use crate::models::{DpiScale, MonitorInfo, Rect};
use ::windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT};
use ::windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetDC, GetMonitorInfoW, GetPixel, HDC, HMONITOR, MONITORINFOEXW,
    ReleaseDC,
};
use ::windows::Win32::UI::HiDpi::GetDpiForSystem;
use std::mem;
use tracing::debug;

const MONITORINFOF_PRIMARY: u32 = 1;
const CLR_INVALID: u32 = 0xFFFF_FFFF;
/// Every second pixel in each direction is enough for an average.
const SAMPLE_STEP: usize = 2;

fn to_rect(rc: RECT) -> Rect {
    Rect::new(rc.left, rc.top, rc.right, rc.bottom)
}

unsafe extern "system" fn enum_monitors_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    unsafe {
        let monitors = &mut *(lparam.0 as *mut Vec<MonitorInfo>);

        let mut info = MONITORINFOEXW::default();
        info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

        if GetMonitorInfoW(hmonitor, &mut info.monitorInfo).as_bool() {
            let name_len = info
                .szDevice
                .iter()
                .position(|&c| c == 0)
                .unwrap_or(info.szDevice.len());
            monitors.push(MonitorInfo {
                device_name: String::from_utf16_lossy(&info.szDevice[..name_len]),
                bounds: to_rect(info.monitorInfo.rcMonitor),
                work_area: to_rect(info.monitorInfo.rcWork),
                is_primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
            });
        }

        BOOL::from(true)
    }
}

pub(super) fn enumerate_monitors() -> Result<Vec<MonitorInfo>, PlatformError> {
    let mut monitors: Vec<MonitorInfo> = Vec::new();
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitors_callback),
            LPARAM(&mut monitors as *mut Vec<MonitorInfo> as isize),
        )
    };
    if !ok.as_bool() {
        return Err(PlatformError::Api {
            api: "EnumDisplayMonitors",
            message: ::windows::core::Error::from_win32().message(),
        });
    }
    debug!(count = monitors.len(), "monitors enumerated");
    Ok(monitors)
}

pub(super) fn capture_pixels(region: SampleRegion) -> Result<Vec<Rgb>, PlatformError> {
    unsafe {
        let hdc = GetDC(HWND::default());
        if hdc.is_invalid() {
            return Err(PlatformError::Api {
                api: "GetDC",
                message: "no screen device context".into(),
            });
        }

        let mut pixels = Vec::new();
        let mut failed = false;
        'rows: for dy in (0..region.height as i32).step_by(SAMPLE_STEP) {
            for dx in (0..region.width as i32).step_by(SAMPLE_STEP) {
                let color = GetPixel(hdc, region.x + dx, region.y + dy);
                if color.0 == CLR_INVALID {
                    // Locked screen or region off the desktop.
                    failed = true;
                    break 'rows;
                }
                pixels.push(Rgb {
                    r: (color.0 & 0xFF) as u8,
                    g: ((color.0 >> 8) & 0xFF) as u8,
                    b: ((color.0 >> 16) & 0xFF) as u8,
                });
            }
        }
        ReleaseDC(HWND::default(), hdc);

        if failed {
            return Err(PlatformError::Api {
                api: "GetPixel",
                message: format!("region at ({}, {}) not readable", region.x, region.y),
            });
        }
        Ok(pixels)
    }
}

pub(super) fn system_dpi_scale() -> DpiScale {
    let dpi = unsafe { GetDpiForSystem() };
    DpiScale::from_dpi(dpi, dpi)
}
