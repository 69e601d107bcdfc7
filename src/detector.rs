// Target game process detection via sysinfo

use std::ffi::OsStr;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::trace;

/// Answers "is this process running right now".
pub trait ProcessProbe {
    fn is_running(&mut self, process_name: &str) -> bool;
}

/// Process probe backed by a sysinfo process table refreshed on every query.
pub struct SysinfoProcessProbe {
    sys: System,
}

impl Default for SysinfoProcessProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProcessProbe {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl ProcessProbe for SysinfoProcessProbe {
    fn is_running(&mut self, process_name: &str) -> bool {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        let found = self
            .sys
            .processes()
            .values()
            .any(|p| matches_process_name(p.name(), process_name));
        trace!(process_name, found, "process probe");
        found
    }
}

/// Case-insensitive process name match that ignores a trailing `.exe`.
pub fn matches_process_name(candidate: &OsStr, target: &str) -> bool {
    let candidate = candidate.to_string_lossy();
    strip_exe(&candidate).eq_ignore_ascii_case(strip_exe(target))
}

fn strip_exe(name: &str) -> &str {
    let Some(split) = name.len().checked_sub(4) else {
        return name;
    };
    match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(".exe") => stem,
        _ => name,
    }
}
