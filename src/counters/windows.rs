// Windows PDH wildcard counters: per-drive busy time from
// `\PhysicalDisk(*)\% Disk Time` and 3D engine load from `\GPU Engine(*)`.

use super::DriveBusyCounter;
use ::windows::Win32::System::Performance::{
    PDH_FMT_COUNTERVALUE_ITEM_W, PDH_FMT_DOUBLE, PDH_HCOUNTER, PDH_HQUERY, PDH_MORE_DATA,
    PdhAddEnglishCounterW, PdhCloseQuery, PdhCollectQueryData, PdhGetFormattedCounterArrayW,
    PdhOpenQueryW,
};
use ::windows::core::{PCWSTR, w};
use std::mem;

const TOTAL_INSTANCE: &str = "_Total";
const PDH_CSTATUS_VALID_DATA: u32 = 0x0000_0000;
const PDH_CSTATUS_NEW_DATA: u32 = 0x0000_0001;

fn check(status: u32, api: &'static str) -> anyhow::Result<()> {
    if status != 0 {
        anyhow::bail!("{} failed with PDH status {:#010x}", api, status);
    }
    Ok(())
}

/// One PDH query holding a single wildcard-instance counter. The query handle
/// is closed exactly once, on drop.
pub(super) struct PdhInstances {
    query: PDH_HQUERY,
    counter: PDH_HCOUNTER,
}

impl PdhInstances {
    /// `\GPU Engine(*engtype_3D)\Utilization Percentage`, one instance per
    /// process and engine.
    pub(super) fn gpu_3d_engines() -> anyhow::Result<Self> {
        Self::open(w!("\\GPU Engine(*engtype_3D)\\Utilization Percentage"))
    }

    fn open(path: PCWSTR) -> anyhow::Result<Self> {
        let mut query = PDH_HQUERY::default();
        check(
            unsafe { PdhOpenQueryW(PCWSTR::null(), 0, &mut query) },
            "PdhOpenQueryW",
        )?;
        let mut this = Self {
            query,
            counter: PDH_HCOUNTER::default(),
        };
        check(
            unsafe { PdhAddEnglishCounterW(this.query, path, 0, &mut this.counter) },
            "PdhAddEnglishCounterW",
        )?;
        // Rate counters need a first collection before values are valid.
        check(
            unsafe { PdhCollectQueryData(this.query) },
            "PdhCollectQueryData",
        )?;
        Ok(this)
    }

    /// Collect once and return every instance with valid data, `_Total` excluded.
    pub(super) fn collect(&mut self) -> anyhow::Result<Vec<(String, f64)>> {
        check(
            unsafe { PdhCollectQueryData(self.query) },
            "PdhCollectQueryData",
        )?;

        let mut buffer_size: u32 = 0;
        let mut item_count: u32 = 0;
        let status = unsafe {
            PdhGetFormattedCounterArrayW(
                self.counter,
                PDH_FMT_DOUBLE,
                &mut buffer_size,
                &mut item_count,
                None,
            )
        };
        if status != PDH_MORE_DATA as u32 {
            check(status, "PdhGetFormattedCounterArrayW")?;
            return Ok(Vec::new());
        }

        // Items are followed by their name strings in the same buffer.
        let words = (buffer_size as usize).div_ceil(mem::size_of::<u64>());
        let mut buffer: Vec<u64> = vec![0; words];
        let items_ptr = buffer.as_mut_ptr() as *mut PDH_FMT_COUNTERVALUE_ITEM_W;
        check(
            unsafe {
                PdhGetFormattedCounterArrayW(
                    self.counter,
                    PDH_FMT_DOUBLE,
                    &mut buffer_size,
                    &mut item_count,
                    Some(items_ptr),
                )
            },
            "PdhGetFormattedCounterArrayW",
        )?;

        let items = unsafe { std::slice::from_raw_parts(items_ptr, item_count as usize) };
        let mut loads = Vec::with_capacity(items.len());
        for item in items {
            let name = unsafe { item.szName.to_string() }.unwrap_or_default();
            if name.is_empty() || name == TOTAL_INSTANCE {
                continue;
            }
            let status = item.FmtValue.CStatus;
            if status != PDH_CSTATUS_VALID_DATA && status != PDH_CSTATUS_NEW_DATA {
                continue;
            }
            let value = unsafe { item.FmtValue.Anonymous.doubleValue };
            loads.push((name, value));
        }
        Ok(loads)
    }
}

impl Drop for PdhInstances {
    fn drop(&mut self) {
        unsafe {
            let _ = PdhCloseQuery(self.query);
        }
    }
}

pub(super) struct PdhDiskTime(PdhInstances);

impl PdhDiskTime {
    pub(super) fn open() -> anyhow::Result<Self> {
        PdhInstances::open(w!("\\PhysicalDisk(*)\\% Disk Time")).map(Self)
    }
}

impl DriveBusyCounter for PdhDiskTime {
    fn read(&mut self) -> anyhow::Result<Vec<(String, f64)>> {
        self.0.collect()
    }

    // PDH keeps the previous raw value itself; a fresh collection makes the
    // next read span only the interval after the reset.
    fn reset(&mut self) -> anyhow::Result<()> {
        check(
            unsafe { PdhCollectQueryData(self.0.query) },
            "PdhCollectQueryData",
        )
    }
}
