// Shared test helpers: in-memory fakes behind the engine's traits

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use tokio::sync::broadcast;
use winhud::config::{AppConfig, ConfigError, ConfigStore};
use winhud::contrast::{Rgb, SampleRegion, ScreenSampler};
use winhud::counters::HardwareSampler;
use winhud::detector::ProcessProbe;
use winhud::engine::{Engine, EngineDeps, EngineSettings, HudEvent};
use winhud::models::{DpiScale, HardwareSample, MonitorInfo, Rect, SurfaceMetrics};
use winhud::platform::{DisplayProvider, PlatformError};

#[derive(Default)]
pub struct SamplerState {
    pub samples: Cell<u32>,
    pub resets: Cell<u32>,
    pub fail: Cell<bool>,
    pub cpu_percent: Cell<f64>,
}

pub struct FakeSampler(pub Rc<SamplerState>);

impl HardwareSampler for FakeSampler {
    fn sample(&mut self) -> anyhow::Result<HardwareSample> {
        self.0.samples.set(self.0.samples.get() + 1);
        if self.0.fail.get() {
            anyhow::bail!("counter read failed");
        }
        Ok(HardwareSample {
            cpu_percent: self.0.cpu_percent.get(),
            ..HardwareSample::default()
        })
    }

    fn reset_baselines(&mut self) {
        self.0.resets.set(self.0.resets.get() + 1);
    }
}

pub struct FakeProbe(pub Rc<Cell<bool>>);

impl ProcessProbe for FakeProbe {
    fn is_running(&mut self, _process_name: &str) -> bool {
        self.0.get()
    }
}

pub struct FakeDisplays(pub Rc<RefCell<Vec<MonitorInfo>>>);

impl DisplayProvider for FakeDisplays {
    fn monitors(&self) -> Result<Vec<MonitorInfo>, PlatformError> {
        Ok(self.0.borrow().clone())
    }
}

#[derive(Default)]
pub struct StoreState {
    pub config: RefCell<AppConfig>,
    pub saves: Cell<u32>,
    pub deny_saves: Cell<bool>,
}

pub struct MemoryStore(pub Rc<StoreState>);

impl ConfigStore for MemoryStore {
    fn load(&self) -> AppConfig {
        self.0.config.borrow().clone()
    }

    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if self.0.deny_saves.get() {
            return Err(ConfigError::PermissionDenied {
                path: PathBuf::from("WinHUD/config.json"),
                dir: PathBuf::from("WinHUD"),
            });
        }
        self.0.saves.set(self.0.saves.get() + 1);
        *self.0.config.borrow_mut() = config.clone();
        Ok(())
    }
}

/// Solid-colour screen; `None` makes every capture fail.
pub struct FakeScreen(pub Rc<Cell<Option<Rgb>>>);

impl ScreenSampler for FakeScreen {
    fn capture(&mut self, region: SampleRegion) -> Result<Vec<Rgb>, PlatformError> {
        match self.0.get() {
            Some(color) => Ok(vec![color; (region.width * region.height / 4) as usize]),
            None => Err(PlatformError::Unsupported),
        }
    }
}

/// Handles onto the fakes wired into an engine.
pub struct Harness {
    pub game_running: Rc<Cell<bool>>,
    pub sampler: Rc<SamplerState>,
    pub store: Rc<StoreState>,
    pub monitors: Rc<RefCell<Vec<MonitorInfo>>>,
    pub screen: Rc<Cell<Option<Rgb>>>,
    pub events: broadcast::Receiver<HudEvent>,
}

pub fn monitor(device_name: &str, work_area: Rect, is_primary: bool) -> MonitorInfo {
    MonitorInfo {
        device_name: device_name.to_string(),
        bounds: work_area,
        work_area,
        is_primary,
    }
}

/// One primary 1920x1080 monitor with no taskbar.
pub fn single_monitor() -> Vec<MonitorInfo> {
    vec![monitor(r"\\.\DISPLAY1", Rect::new(0, 0, 1920, 1080), true)]
}

pub fn surface(height: f64) -> SurfaceMetrics {
    SurfaceMetrics {
        dpi: DpiScale::IDENTITY,
        width: 200.0,
        height,
    }
}

pub fn engine_with(config: AppConfig) -> (Engine, Harness) {
    let game_running = Rc::new(Cell::new(false));
    let sampler = Rc::new(SamplerState::default());
    let store = Rc::new(StoreState {
        config: RefCell::new(config),
        ..StoreState::default()
    });
    let monitors = Rc::new(RefCell::new(single_monitor()));
    let screen = Rc::new(Cell::new(None));
    let (tx, events) = broadcast::channel(64);

    let engine = Engine::new(
        EngineDeps {
            sampler: Box::new(FakeSampler(sampler.clone())),
            probe: Box::new(FakeProbe(game_running.clone())),
            displays: Box::new(FakeDisplays(monitors.clone())),
            store: Box::new(MemoryStore(store.clone())),
            screen: Some(Box::new(FakeScreen(screen.clone()))),
            events: tx,
        },
        EngineSettings::default(),
    );

    (
        engine,
        Harness {
            game_running,
            sampler,
            store,
            monitors,
            screen,
            events,
        },
    )
}

/// Everything published so far.
pub fn drain(events: &mut broadcast::Receiver<HudEvent>) -> Vec<HudEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}
