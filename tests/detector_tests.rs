// Target process name matching

use std::ffi::OsStr;
use winhud::detector::{ProcessProbe, SysinfoProcessProbe, matches_process_name};

#[test]
fn matches_ignoring_case_and_exe_suffix() {
    let target = "gameoverlayui64";
    assert!(matches_process_name(OsStr::new("gameoverlayui64"), target));
    assert!(matches_process_name(OsStr::new("GameOverlayUI64.exe"), target));
    assert!(matches_process_name(OsStr::new("gameoverlayui64.EXE"), target));
    assert!(matches_process_name(OsStr::new("gameoverlayui64"), "GameOverlayUI64.exe"));
}

#[test]
fn rejects_other_names() {
    let target = "gameoverlayui64";
    assert!(!matches_process_name(OsStr::new("gameoverlayui"), target));
    assert!(!matches_process_name(OsStr::new("gameoverlayui64.dll"), target));
    assert!(!matches_process_name(OsStr::new("steam.exe"), target));
    assert!(!matches_process_name(OsStr::new(".exe"), target));
    assert!(!matches_process_name(OsStr::new(""), target));
}

#[test]
fn system_probe_does_not_find_missing_process() {
    let mut probe = SysinfoProcessProbe::new();
    assert!(!probe.is_running("winhud-no-such-process-7f3a"));
}
