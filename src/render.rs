// Text rendering of the layout tree against a hardware sample

use crate::models::{
    ContainerNode, HardwareSample, LayoutDirection, LayoutNode, WidgetKind, WidgetNode,
};

const HORIZONTAL_SEPARATOR: &str = "   |   ";
const SPEED_WIDTH: usize = 10;

/// Human-readable rate, right-aligned to a fixed width so values don't jitter.
pub fn format_speed(bytes_per_sec: f64) -> String {
    let text = if bytes_per_sec < 1024.0 {
        format!("{:.0} B/s", bytes_per_sec)
    } else if bytes_per_sec < 1024.0 * 1024.0 {
        format!("{:.1} KB/s", bytes_per_sec / 1024.0)
    } else {
        format!("{:.1} MB/s", bytes_per_sec / 1024.0 / 1024.0)
    };
    format!("{:>width$}", text, width = SPEED_WIDTH)
}

/// Render top-level nodes as a vertical stack.
pub fn render_layout(nodes: &[LayoutNode], sample: &HardwareSample) -> String {
    nodes
        .iter()
        .map(|node| render_node(node, LayoutDirection::Vertical, sample))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_node(node: &LayoutNode, parent: LayoutDirection, sample: &HardwareSample) -> String {
    match node {
        LayoutNode::Layout(container) => render_container(container, sample),
        LayoutNode::Widget(widget) => render_widget(widget, parent, sample),
    }
}

fn render_container(container: &ContainerNode, sample: &HardwareSample) -> String {
    let separator = match container.direction {
        LayoutDirection::Vertical => "\n",
        LayoutDirection::Horizontal => HORIZONTAL_SEPARATOR,
    };
    container
        .children
        .iter()
        .map(|child| render_node(child, container.direction, sample))
        .collect::<Vec<_>>()
        .join(separator)
}

/// One widget's text. `direction` is the enclosing container's, which the
/// disk list uses to lay out its entries.
pub fn render_widget(
    widget: &WidgetNode,
    direction: LayoutDirection,
    sample: &HardwareSample,
) -> String {
    let value = match widget.kind {
        WidgetKind::Cpu => format!("{:.0}%", sample.cpu_percent),
        WidgetKind::Gpu => match sample.gpu_percent {
            Some(p) => format!("{:.0}%", p),
            None => "N/A".to_string(),
        },
        WidgetKind::Ram => format!("{:.0} MB free", sample.ram_available_mb),
        WidgetKind::Disk => format!(
            "↓ {}  ↑ {}",
            format_speed(sample.disk_read_bytes_per_sec),
            format_speed(sample.disk_write_bytes_per_sec)
        ),
        WidgetKind::Network => format!(
            "↓ {}  ↑ {}",
            format_speed(sample.net_download_bytes_per_sec),
            format_speed(sample.net_upload_bytes_per_sec)
        ),
        WidgetKind::DiskList => {
            let separator = match direction {
                LayoutDirection::Vertical => "\n",
                LayoutDirection::Horizontal => HORIZONTAL_SEPARATOR,
            };
            sample
                .disk_loads
                .iter()
                .map(|(name, pct)| format!("Disk {} - {:.0}%", name, pct))
                .collect::<Vec<_>>()
                .join(separator)
        }
    };
    format!("{}{}", widget.prefix_text, value)
}
