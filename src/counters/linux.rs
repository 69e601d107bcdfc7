// Linux per-drive busy time from /proc/diskstats io_ticks.

use super::DriveBusyCounter;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

const DISKSTATS_PATH: &str = "/proc/diskstats";

/// Busy percent per whole-disk block device: milliseconds spent doing I/O
/// between two reads, divided by the wall time between them.
pub(super) struct DiskStatsBusy {
    previous: HashMap<String, u64>,
    previous_at: Instant,
}

impl DiskStatsBusy {
    pub(super) fn open() -> anyhow::Result<Self> {
        Ok(Self {
            previous: read_io_ticks()?,
            previous_at: Instant::now(),
        })
    }
}

fn read_io_ticks() -> anyhow::Result<HashMap<String, u64>> {
    let content = std::fs::read_to_string(DISKSTATS_PATH)?;
    Ok(whole_disks(parse_diskstats(&content)))
}

/// Share of `elapsed_ms` the device spent busy, from two io_ticks readings.
/// A counter that went backwards (device re-attached) reads as idle.
pub(super) fn busy_percent(previous_ticks: u64, ticks: u64, elapsed_ms: f64) -> f64 {
    if elapsed_ms <= 0.0 {
        return 0.0;
    }
    ticks.saturating_sub(previous_ticks) as f64 / elapsed_ms * 100.0
}

impl DriveBusyCounter for DiskStatsBusy {
    fn read(&mut self) -> anyhow::Result<Vec<(String, f64)>> {
        let current = read_io_ticks()?;
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.previous_at).as_secs_f64() * 1000.0;

        let mut loads: Vec<(String, f64)> = current
            .iter()
            .filter_map(|(name, ticks)| {
                let prev = self.previous.get(name)?;
                Some((name.clone(), busy_percent(*prev, *ticks, elapsed_ms)))
            })
            .collect();
        loads.sort_by(|a, b| a.0.cmp(&b.0));

        self.previous = current;
        self.previous_at = now;
        Ok(loads)
    }

    fn reset(&mut self) -> anyhow::Result<()> {
        self.previous = read_io_ticks()?;
        self.previous_at = Instant::now();
        Ok(())
    }
}

/// (device name, io_ticks ms) for every line of /proc/diskstats.
/// Columns: major minor name, then 11+ stat fields; io_ticks is the 10th.
pub(super) fn parse_diskstats(content: &str) -> Vec<(String, u64)> {
    content
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let name = fields.get(2)?;
            let io_ticks = fields.get(12)?.parse::<u64>().ok()?;
            Some((name.to_string(), io_ticks))
        })
        .filter(|(name, _)| !is_virtual_device(name))
        .collect()
}

fn is_virtual_device(name: &str) -> bool {
    ["loop", "ram", "zram", "dm-", "sr"]
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Keep devices that are whole disks (listed under /sys/block), not partitions.
fn whole_disks(entries: Vec<(String, u64)>) -> HashMap<String, u64> {
    entries
        .into_iter()
        .filter(|(name, _)| Path::new("/sys/block").join(name).exists())
        .collect()
}
