// Text rendering of layouts and speed formatting

use std::collections::BTreeMap;
use winhud::models::*;
use winhud::render::{format_speed, render_layout, render_widget};

fn sample() -> HardwareSample {
    HardwareSample {
        cpu_percent: 42.4,
        gpu_percent: None,
        ram_available_mb: 8192.3,
        disk_read_bytes_per_sec: 0.0,
        disk_write_bytes_per_sec: 2048.0,
        disk_loads: BTreeMap::from([("0 C:".to_string(), 12.4), ("1 D:".to_string(), 80.0)]),
        net_download_bytes_per_sec: 3.0 * 1024.0 * 1024.0,
        net_upload_bytes_per_sec: 512.0,
    }
}

fn widget(kind: WidgetKind, prefix: &str) -> LayoutNode {
    LayoutNode::Widget(WidgetNode::new(kind, prefix))
}

#[test]
fn speeds_use_fixed_width_and_units() {
    assert_eq!(format_speed(0.0), "     0 B/s");
    assert_eq!(format_speed(1023.0), "  1023 B/s");
    assert_eq!(format_speed(1536.0), "  1.5 KB/s");
    assert_eq!(format_speed(5.0 * 1024.0 * 1024.0), "  5.0 MB/s");
    assert_eq!(format_speed(512.0).len(), 10);
}

#[test]
fn default_layout_renders_cpu_and_ram() {
    assert_eq!(
        render_layout(&default_layout(), &sample()),
        "CPU: 42%\nRAM: 8192 MB free"
    );
}

#[test]
fn missing_gpu_renders_na() {
    let mut s = sample();
    let node = WidgetNode::new(WidgetKind::Gpu, "GPU: ");
    assert_eq!(render_widget(&node, LayoutDirection::Vertical, &s), "GPU: N/A");
    s.gpu_percent = Some(63.0);
    assert_eq!(render_widget(&node, LayoutDirection::Vertical, &s), "GPU: 63%");
}

#[test]
fn disk_list_follows_container_direction() {
    let vertical = vec![LayoutNode::Layout(ContainerNode::new(
        LayoutDirection::Vertical,
        2.0,
        vec![widget(WidgetKind::DiskList, "")],
    ))];
    assert_eq!(
        render_layout(&vertical, &sample()),
        "Disk 0 C: - 12%\nDisk 1 D: - 80%"
    );

    let horizontal = vec![LayoutNode::Layout(ContainerNode::new(
        LayoutDirection::Horizontal,
        2.0,
        vec![widget(WidgetKind::Cpu, "CPU "), widget(WidgetKind::DiskList, "")],
    ))];
    assert_eq!(
        render_layout(&horizontal, &sample()),
        "CPU 42%   |   Disk 0 C: - 12%   |   Disk 1 D: - 80%"
    );
}

#[test]
fn rates_render_down_then_up() {
    let s = sample();
    let net = WidgetNode::new(WidgetKind::Network, "Net: ");
    assert_eq!(
        render_widget(&net, LayoutDirection::Vertical, &s),
        "Net: ↓   3.0 MB/s  ↑    512 B/s"
    );
    let disk = WidgetNode::new(WidgetKind::Disk, "Disk: ");
    assert_eq!(
        render_widget(&disk, LayoutDirection::Vertical, &s),
        "Disk: ↓      0 B/s  ↑   2.0 KB/s"
    );
}

#[test]
fn nested_containers_render_depth_first() {
    let layout = vec![LayoutNode::Layout(ContainerNode::new(
        LayoutDirection::Vertical,
        2.0,
        vec![
            widget(WidgetKind::Cpu, "CPU: "),
            LayoutNode::Layout(ContainerNode::new(
                LayoutDirection::Horizontal,
                5.0,
                vec![widget(WidgetKind::Ram, "RAM: "), widget(WidgetKind::Gpu, "GPU: ")],
            )),
        ],
    ))];
    assert_eq!(
        render_layout(&layout, &sample()),
        "CPU: 42%\nRAM: 8192 MB free   |   GPU: N/A"
    );
}

#[test]
fn empty_layout_renders_nothing() {
    assert_eq!(render_layout(&[], &sample()), "");
}
