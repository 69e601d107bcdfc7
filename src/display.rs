// Headless HUD: renders engine events to text in the log and reports the
// measured surface back to the engine so placement can follow content size.

use crate::config::AppConfig;
use crate::engine::{HudEvent, Signal};
use crate::models::{DpiScale, LayoutNode, SurfaceMetrics};
use crate::render;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

const LINE_HEIGHT_FACTOR: f64 = 1.33;
const CHAR_WIDTH_FACTOR: f64 = 0.6;
const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Approximate surface size of `text` at `font_size`, in device-independent units.
pub fn measure(text: &str, font_size: f64, dpi: DpiScale) -> SurfaceMetrics {
    let lines = text.lines().count().max(1);
    let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    SurfaceMetrics {
        dpi,
        width: widest as f64 * font_size * CHAR_WIDTH_FACTOR,
        height: lines as f64 * font_size * LINE_HEIGHT_FACTOR,
    }
}

/// Largest widget font in the tree; sizes the text block.
fn max_font_size(nodes: &[LayoutNode]) -> Option<f64> {
    nodes
        .iter()
        .filter_map(|node| match node {
            LayoutNode::Layout(c) => max_font_size(&c.children),
            LayoutNode::Widget(w) => Some(w.font_size),
        })
        .reduce(f64::max)
}

pub struct ConsoleHud {
    config: AppConfig,
    visible: bool,
    dpi: DpiScale,
    metrics: Option<SurfaceMetrics>,
    signals: mpsc::Sender<Signal>,
}

impl ConsoleHud {
    pub fn new(dpi: DpiScale, signals: mpsc::Sender<Signal>) -> Self {
        Self {
            config: AppConfig::default(),
            visible: false,
            dpi,
            metrics: None,
            signals,
        }
    }

    /// Apply one event. Returns the frame text when a sample was rendered.
    pub fn apply(&mut self, event: HudEvent) -> Option<String> {
        match event {
            HudEvent::ConfigChanged(config) => {
                self.config = config;
                None
            }
            HudEvent::Visibility { visible, mode } => {
                self.visible = visible;
                info!(visible, %mode, "overlay visibility");
                None
            }
            HudEvent::Sample(sample) => {
                if !self.visible {
                    return None;
                }
                let frame = render::render_layout(&self.config.layout, &sample);
                debug!(frame = %frame, "frame");
                self.report_size(&frame);
                Some(frame)
            }
            HudEvent::Anchor(anchor) => {
                debug!(left = anchor.left, top = anchor.top, "overlay moved");
                None
            }
            HudEvent::TextColor(color) => {
                debug!(?color, rgb = ?color.rgb(), "text colour");
                None
            }
            HudEvent::Notice(message) => {
                warn!(notice = %message, "user notice");
                None
            }
        }
    }

    fn report_size(&mut self, frame: &str) {
        let font_size = max_font_size(&self.config.layout).unwrap_or(DEFAULT_FONT_SIZE);
        let metrics = measure(frame, font_size, self.dpi);
        if self.metrics == Some(metrics) {
            return;
        }
        self.metrics = Some(metrics);
        if self.signals.try_send(Signal::SurfaceResized(metrics)).is_err() {
            debug!(operation = "report_size", "signal channel full or closed");
        }
    }
}

/// Consume events until the engine's sender goes away.
pub fn spawn(
    mut hud: ConsoleHud,
    mut events: broadcast::Receiver<HudEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    hud.apply(event);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "display fell behind, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("display shutting down");
    })
}
