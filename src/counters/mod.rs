// Hardware counters: sysinfo for CPU/RAM/disk I/O/network, platform counters
// for per-drive busy time, NVML or PDH engine counters for GPU load.

mod gpu;
#[cfg(target_os = "linux")]
mod linux;
#[cfg(windows)]
mod windows;

use crate::delta::{ByteCounts, DeltaTracker};
use crate::models::HardwareSample;
use std::collections::BTreeMap;
use std::time::Instant;
use sysinfo::{Disks, Networks, System};
use tracing::{debug, instrument, warn};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Source of per-tick hardware samples.
pub trait HardwareSampler {
    fn sample(&mut self) -> anyhow::Result<HardwareSample>;

    /// Drop cumulative-counter baselines; the next sample reports zero rates.
    fn reset_baselines(&mut self);
}

/// Per-drive busy percentage, raw (may exceed 100 under overlapping I/O).
trait DriveBusyCounter {
    fn read(&mut self) -> anyhow::Result<Vec<(String, f64)>>;

    /// Re-baseline so the next read covers only the time after this call.
    fn reset(&mut self) -> anyhow::Result<()>;
}

/// Clamp a raw busy-time reading into [0, 100]; NaN reads as idle.
pub fn clamp_busy_percent(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

/// Owns every OS counter handle. Counters that fail to open are logged and
/// left out; their metric reads as unavailable. Handles are released when the
/// source is dropped.
pub struct CounterSource {
    sys: System,
    disks: Disks,
    networks: Networks,
    drive_busy: Option<Box<dyn DriveBusyCounter>>,
    gpu: Option<gpu::GpuSensor>,
    network_baseline: DeltaTracker,
    disk_io_baseline: DeltaTracker,
}

impl Default for CounterSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();

        let drive_busy = match open_drive_busy_counter() {
            Ok(counter) => Some(counter),
            Err(e) => {
                warn!(
                    error = %e,
                    counter = "drive_busy",
                    "counter unavailable, per-drive load disabled"
                );
                None
            }
        };
        let gpu = gpu::GpuSensor::open();

        debug!(
            disks = disks.list().len(),
            interfaces = networks.list().len(),
            drive_busy = drive_busy.is_some(),
            gpu = gpu.is_some(),
            "counter source opened"
        );

        Self {
            sys,
            disks,
            networks,
            drive_busy,
            gpu,
            network_baseline: DeltaTracker::new(),
            disk_io_baseline: DeltaTracker::new(),
        }
    }

    pub fn has_gpu(&self) -> bool {
        self.gpu.is_some()
    }

    /// Cumulative bytes over every non-loopback interface.
    fn network_totals(&self) -> ByteCounts {
        self.networks
            .list()
            .iter()
            .filter(|(name, _)| !is_loopback_interface(name))
            .fold(ByteCounts::default(), |acc, (_, data)| ByteCounts {
                received: acc.received.saturating_add(data.total_received()),
                sent: acc.sent.saturating_add(data.total_transmitted()),
            })
    }

    /// Cumulative bytes read (`received`) and written (`sent`) across disks.
    fn disk_io_totals(&self) -> ByteCounts {
        self.disks
            .list()
            .iter()
            .fold(ByteCounts::default(), |acc, d| {
                let usage = d.usage();
                ByteCounts {
                    received: acc.received.saturating_add(usage.total_read_bytes),
                    sent: acc.sent.saturating_add(usage.total_written_bytes),
                }
            })
    }

    fn drive_loads(&mut self) -> anyhow::Result<BTreeMap<String, f64>> {
        let Some(counter) = self.drive_busy.as_mut() else {
            return Ok(BTreeMap::new());
        };
        let readings = counter.read()?;
        Ok(readings
            .into_iter()
            .map(|(name, raw)| (name, clamp_busy_percent(raw)))
            .collect())
    }
}

impl HardwareSampler for CounterSource {
    #[instrument(skip(self), fields(operation = "sample"))]
    fn sample(&mut self) -> anyhow::Result<HardwareSample> {
        let now = Instant::now();
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.disks.refresh(false);
        self.networks.refresh(true);

        let cpu_percent = (self.sys.global_cpu_usage() as f64).clamp(0.0, 100.0);
        let ram_available_mb = self.sys.available_memory() as f64 / BYTES_PER_MB;

        let disk_io = self
            .disk_io_baseline
            .compute_delta(self.disk_io_totals(), now);
        let net = self
            .network_baseline
            .compute_delta(self.network_totals(), now);

        let disk_loads = self
            .drive_loads()
            .map_err(|e| e.context("drive busy counter"))?;
        let gpu_percent = self.gpu.as_mut().and_then(|g| g.load_percent());

        Ok(HardwareSample {
            cpu_percent,
            gpu_percent,
            ram_available_mb,
            disk_read_bytes_per_sec: disk_io.received_per_sec(),
            disk_write_bytes_per_sec: disk_io.sent_per_sec(),
            disk_loads,
            net_download_bytes_per_sec: net.received_per_sec(),
            net_upload_bytes_per_sec: net.sent_per_sec(),
        })
    }

    fn reset_baselines(&mut self) {
        self.network_baseline.reset();
        self.disk_io_baseline.reset();
        if let Some(counter) = self.drive_busy.as_mut() {
            if let Err(e) = counter.reset() {
                warn!(error = %e, counter = "drive_busy", "baseline reset failed");
            }
        }
    }
}

impl Drop for CounterSource {
    fn drop(&mut self) {
        debug!("counter source released");
    }
}

fn is_loopback_interface(name: &str) -> bool {
    name == "lo" || name.starts_with("lo:") || name.to_ascii_lowercase().contains("loopback")
}

#[cfg(windows)]
fn open_drive_busy_counter() -> anyhow::Result<Box<dyn DriveBusyCounter>> {
    Ok(Box::new(windows::PdhDiskTime::open()?))
}

#[cfg(target_os = "linux")]
fn open_drive_busy_counter() -> anyhow::Result<Box<dyn DriveBusyCounter>> {
    Ok(Box::new(linux::DiskStatsBusy::open()?))
}

#[cfg(not(any(windows, target_os = "linux")))]
fn open_drive_busy_counter() -> anyhow::Result<Box<dyn DriveBusyCounter>> {
    anyhow::bail!("per-drive busy counters are not supported on this platform")
}
