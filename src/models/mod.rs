// Domain models shared by the engine and the display layer

mod display;
mod layout;
mod mode;
mod sample;
mod wire;

pub use display::{Anchor, DpiScale, MonitorInfo, Rect, SurfaceMetrics};
pub use layout::{
    ContainerNode, LayoutDirection, LayoutNode, Margin, WidgetKind, WidgetNode, default_layout,
};
pub use mode::OverlayMode;
pub use sample::HardwareSample;
