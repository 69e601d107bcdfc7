// GPU load via NVML (NVIDIA), falling back on Windows to the PDH 3D engine
// counters, which cover every vendor. With neither, GPU load reads as
// unavailable.

#[cfg(feature = "nvml")]
use nvml_wrapper::Nvml;
use std::collections::HashMap;
use tracing::debug;
#[cfg(any(feature = "nvml", windows))]
use tracing::warn;

pub(super) enum GpuSensor {
    #[cfg(feature = "nvml")]
    Nvml { nvml: Nvml, device_index: u32 },
    #[cfg(windows)]
    EngineCounters(super::windows::PdhInstances),
}

impl GpuSensor {
    /// Open the first usable GPU source. Logs and returns `None` when none is
    /// discoverable.
    pub(super) fn open() -> Option<Self> {
        #[cfg(feature = "nvml")]
        {
            if let Some(sensor) = Self::open_nvml() {
                return Some(sensor);
            }
        }
        #[cfg(windows)]
        {
            match super::windows::PdhInstances::gpu_3d_engines() {
                Ok(counters) => {
                    debug!(counter = "gpu", source = "pdh", "GPU sensor opened");
                    return Some(GpuSensor::EngineCounters(counters));
                }
                Err(e) => {
                    warn!(error = %e, counter = "gpu", "GPU engine counter missing, GPU load unavailable");
                }
            }
        }
        debug!(counter = "gpu", "no GPU load source");
        None
    }

    #[cfg(feature = "nvml")]
    fn open_nvml() -> Option<Self> {
        let nvml = match Nvml::init() {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, counter = "gpu", "NVML init failed");
                return None;
            }
        };
        let name = match nvml.device_by_index(0).and_then(|d| d.name()) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, counter = "gpu", "no NVML device found");
                return None;
            }
        };
        debug!(gpu = %name, source = "nvml", "GPU sensor opened");
        Some(GpuSensor::Nvml {
            nvml,
            device_index: 0,
        })
    }

    /// Core load percent, `None` when the read fails this tick.
    pub(super) fn load_percent(&mut self) -> Option<f64> {
        match *self {
            #[cfg(feature = "nvml")]
            GpuSensor::Nvml {
                ref nvml,
                device_index,
            } => match nvml
                .device_by_index(device_index)
                .and_then(|d| d.utilization_rates())
            {
                Ok(u) => Some(super::clamp_busy_percent(u.gpu as f64)),
                Err(e) => {
                    debug!(error = %e, device_index, "GPU load read failed");
                    None
                }
            },
            #[cfg(windows)]
            GpuSensor::EngineCounters(ref mut counters) => match counters.collect() {
                Ok(instances) => Some(busiest_adapter_load(&instances)),
                Err(e) => {
                    debug!(error = %e, "GPU engine counter read failed");
                    None
                }
            },
        }
    }
}

/// Adapter part of an engine instance name such as
/// `pid_1234_luid_0x00000000_0x0000D1B2_phys_0_eng_0_engtype_3D`.
#[cfg_attr(not(windows), allow(dead_code))]
fn adapter_key(instance: &str) -> &str {
    let from_luid = instance.find("luid_").map_or(instance, |i| &instance[i..]);
    from_luid
        .find("_eng_")
        .map_or(from_luid, |end| &from_luid[..end])
}

/// Sum engine loads per adapter and report the busiest adapter, clamped to
/// [0, 100].
#[cfg_attr(not(windows), allow(dead_code))]
pub(super) fn busiest_adapter_load(instances: &[(String, f64)]) -> f64 {
    let mut per_adapter: HashMap<&str, f64> = HashMap::new();
    for (name, value) in instances {
        *per_adapter.entry(adapter_key(name)).or_default() += value;
    }
    per_adapter
        .into_values()
        .map(super::clamp_busy_percent)
        .fold(0.0, f64::max)
}
