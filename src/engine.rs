// HUD engine: owns the polling loop, visibility state, placement and config writes.
// Input arrives as `Signal`s, output leaves as `HudEvent`s on a broadcast channel.

use crate::config::policy::{CONTRAST_INTERVAL, TARGET_PROCESS, TICK_INTERVAL};
use crate::config::{AppConfig, ConfigError, ConfigStore};
use crate::contrast::{self, ScreenSampler, TextColor};
use crate::counters::HardwareSampler;
use crate::detector::ProcessProbe;
use crate::models::{Anchor, HardwareSample, OverlayMode, SurfaceMetrics};
use crate::placement;
use crate::platform::DisplayProvider;
use crate::policy;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, instrument, trace, warn};

/// Capacity of the `HudEvent` broadcast channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
/// Capacity of the `Signal` channel feeding the engine.
pub const SIGNAL_CHANNEL_CAPACITY: usize = 16;

/// External input to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Global hotkey pressed.
    Toggle,
    /// User picked another monitor (OS device name).
    MonitorChanged(String),
    /// The display layer re-measured the overlay surface.
    SurfaceResized(SurfaceMetrics),
    /// config.json was edited externally.
    ReloadConfig,
}

/// Engine output consumed by the display layer.
#[derive(Debug, Clone, PartialEq)]
pub enum HudEvent {
    Visibility { visible: bool, mode: OverlayMode },
    Sample(HardwareSample),
    Anchor(Anchor),
    ConfigChanged(AppConfig),
    TextColor(TextColor),
    /// One-time user-facing message (e.g. settings cannot be saved).
    Notice(String),
}

/// Result of one polling tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub visible: bool,
    pub mode: OverlayMode,
    /// `None` while hidden or when sampling failed this tick.
    pub sample: Option<HardwareSample>,
}

/// Collaborators behind the engine's seams.
pub struct EngineDeps {
    pub sampler: Box<dyn HardwareSampler>,
    pub probe: Box<dyn ProcessProbe>,
    pub displays: Box<dyn DisplayProvider>,
    pub store: Box<dyn ConfigStore>,
    /// Absent where the screen cannot be read; text stays bright.
    pub screen: Option<Box<dyn ScreenSampler>>,
    pub events: broadcast::Sender<HudEvent>,
}

/// Loop timing and the game process to watch.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub tick_interval: Duration,
    pub contrast_interval: Duration,
    pub target_process: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            contrast_interval: CONTRAST_INTERVAL,
            target_process: TARGET_PROCESS.to_string(),
        }
    }
}

pub struct Engine {
    sampler: Box<dyn HardwareSampler>,
    probe: Box<dyn ProcessProbe>,
    displays: Box<dyn DisplayProvider>,
    store: Box<dyn ConfigStore>,
    screen: Option<Box<dyn ScreenSampler>>,
    events: broadcast::Sender<HudEvent>,
    settings: EngineSettings,

    config: AppConfig,
    visible: bool,
    /// Last visibility sent out; `None` until the first tick.
    published_visibility: Option<bool>,
    surface: Option<SurfaceMetrics>,
    anchor: Option<Anchor>,
    text_color: TextColor,
    save_notice_sent: bool,
}

impl Engine {
    /// Load config (installing and saving the default layout when none is
    /// stored) and announce it with `HudEvent::ConfigChanged`.
    pub fn new(deps: EngineDeps, settings: EngineSettings) -> Self {
        let EngineDeps {
            sampler,
            probe,
            displays,
            store,
            screen,
            events,
        } = deps;
        let config = store.load();

        let mut engine = Self {
            sampler,
            probe,
            displays,
            store,
            screen,
            events,
            settings,
            config,
            visible: false,
            published_visibility: None,
            surface: None,
            anchor: None,
            text_color: TextColor::default(),
            save_notice_sent: false,
        };

        if engine.config.ensure_default_layout() {
            info!("no layout stored, saving default layout");
            engine.persist();
        }
        engine.publish(HudEvent::ConfigChanged(engine.config.clone()));
        engine
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mode(&self) -> OverlayMode {
        self.config.mode
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn text_color(&self) -> TextColor {
        self.text_color
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HudEvent> {
        self.events.subscribe()
    }

    /// One polling step: detect the game, apply the visibility policy, and
    /// sample hardware while visible. Never fails; a sampling error is logged
    /// and reported as a missing sample.
    #[instrument(level = "debug", skip(self), fields(operation = "tick"))]
    pub fn tick(&mut self) -> TickReport {
        let game_active = self.probe.is_running(&self.settings.target_process);
        let mode = self.config.mode;
        let visible = policy::should_show(mode, game_active);
        let was_visible = self.visible;
        self.visible = visible;

        if self.published_visibility != Some(visible) {
            self.published_visibility = Some(visible);
            debug!(visible, %mode, game_active, "visibility changed");
            self.publish(HudEvent::Visibility { visible, mode });
        }

        if !visible {
            return TickReport {
                visible,
                mode,
                sample: None,
            };
        }

        if !was_visible {
            // First visible sample reports zero rates.
            self.sampler.reset_baselines();
            self.place();
        }

        let sample = match self.sampler.sample() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, operation = "sample", "hardware sample failed, tick skipped");
                return TickReport {
                    visible,
                    mode,
                    sample: None,
                };
            }
        };
        self.publish(HudEvent::Sample(sample.clone()));
        TickReport {
            visible,
            mode,
            sample: Some(sample),
        }
    }

    /// Hotkey: move to the mode that flips what the user sees, save it, and
    /// apply it right away instead of on the next interval tick.
    pub fn toggle(&mut self) -> TickReport {
        let game_active = self.probe.is_running(&self.settings.target_process);
        let mode = policy::next_mode(self.config.mode, game_active);
        info!(from = %self.config.mode, to = %mode, game_active, "overlay toggled");
        self.config.mode = mode;
        self.persist();
        self.tick()
    }

    /// Pin the overlay to another monitor and remember the choice.
    pub fn select_monitor(&mut self, device_name: &str) {
        info!(device_name, "monitor selected");
        self.config.target_monitor_device_name = device_name.to_string();
        self.persist();
        self.publish(HudEvent::ConfigChanged(self.config.clone()));
        self.place();
    }

    /// New surface size or DPI; re-anchor so the bottom edge stays put.
    pub fn surface_resized(&mut self, metrics: SurfaceMetrics) {
        trace!(width = metrics.width, height = metrics.height, "surface resized");
        self.surface = Some(metrics);
        self.place();
    }

    /// Re-read config.json and apply it.
    pub fn reload_config(&mut self) {
        self.config = self.store.load();
        if self.config.ensure_default_layout() {
            self.persist();
        }
        info!(mode = %self.config.mode, "config reloaded");
        self.publish(HudEvent::ConfigChanged(self.config.clone()));
        self.place();
        self.tick();
    }

    pub fn handle(&mut self, signal: Signal) {
        match signal {
            Signal::Toggle => {
                self.toggle();
            }
            Signal::MonitorChanged(device_name) => self.select_monitor(&device_name),
            Signal::SurfaceResized(metrics) => self.surface_resized(metrics),
            Signal::ReloadConfig => self.reload_config(),
        }
    }

    /// Re-evaluate text colour against what is behind the overlay. Capture
    /// failures fall back to bright text. Only runs while visible and placed.
    pub fn refresh_contrast(&mut self) -> TextColor {
        if !self.visible {
            return self.text_color;
        }
        let (Some(anchor), Some(surface), Some(screen)) =
            (self.anchor, self.surface, self.screen.as_mut())
        else {
            return self.text_color;
        };

        let region = contrast::sample_region(anchor, surface);
        let color = match screen.capture(region) {
            Ok(pixels) => contrast::average_luminance(&pixels)
                .map(contrast::pick_text_color)
                .unwrap_or_default(),
            Err(e) => {
                debug!(error = %e, operation = "refresh_contrast", "screen capture failed");
                TextColor::default()
            }
        };

        if color != self.text_color {
            debug!(?color, "text colour changed");
            self.text_color = color;
            self.publish(HudEvent::TextColor(color));
        }
        color
    }

    /// Drive the engine until `shutdown_rx` fires (or its sender is dropped).
    #[instrument(skip_all, name = "engine")]
    pub async fn run(
        mut self,
        mut signals: mpsc::Receiver<Signal>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        let mut tick = interval(self.settings.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut contrast_tick = interval(self.settings.contrast_interval);
        contrast_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            tick_ms = self.settings.tick_interval.as_millis() as u64,
            mode = %self.config.mode,
            "engine started"
        );

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    self.tick();
                }
                Some(signal) = signals.recv() => {
                    debug!(?signal, "signal received");
                    self.handle(signal);
                }
                _ = contrast_tick.tick() => {
                    self.refresh_contrast();
                }
                _ = &mut shutdown_rx => {
                    debug!("engine shutting down");
                    break;
                }
            }
        }
    }

    fn place(&mut self) {
        let Some(surface) = self.surface else {
            debug!(operation = "place", "no surface metrics yet, placement skipped");
            return;
        };
        let monitors = match self.displays.monitors() {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, operation = "place", "monitor enumeration failed");
                return;
            }
        };
        let Some(monitor) =
            placement::select_monitor(&monitors, &self.config.target_monitor_device_name)
        else {
            warn!(operation = "place", "no monitors attached, placement skipped");
            return;
        };

        let anchor = placement::anchor_for(monitor.work_area, surface.dpi, surface.height);
        debug!(
            monitor = %monitor.device_name,
            left = anchor.left,
            top = anchor.top,
            "overlay placed"
        );
        self.anchor = Some(anchor);
        self.publish(HudEvent::Anchor(anchor));
    }

    fn persist(&mut self) {
        match self.store.save(&self.config) {
            Ok(()) => {}
            Err(e @ ConfigError::PermissionDenied { .. }) => {
                warn!(error = %e, operation = "save_config", "config not saved");
                if !self.save_notice_sent {
                    self.save_notice_sent = true;
                    self.publish(HudEvent::Notice(e.to_string()));
                }
            }
            Err(e) => {
                warn!(error = %e, operation = "save_config", "config not saved");
            }
        }
    }

    fn publish(&self, event: HudEvent) {
        if self.events.send(event).is_err() {
            trace!("no HUD event receivers");
        }
    }
}
