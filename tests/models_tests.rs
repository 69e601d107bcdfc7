// Model serialization: layout tree discriminators, enum indices, margins

use winhud::models::*;

#[test]
fn layout_tree_uses_type_discriminator() {
    let json = serde_json::to_value(default_layout()).unwrap();
    assert_eq!(json[0]["$type"], "layout");
    assert_eq!(json[0]["Direction"], 0);
    assert_eq!(json[0]["Spacing"], 2.0);
    assert_eq!(json[0]["MarginRight"], 15.0);
    let children = json[0]["Children"].as_array().unwrap();
    assert_eq!(children[0]["$type"], "widget");
    assert_eq!(children[0]["Type"], 0);
    assert_eq!(children[0]["PrefixText"], "CPU: ");
    assert_eq!(children[1]["Type"], 2);
}

#[test]
fn widget_defaults_apply_when_fields_missing() {
    let node: LayoutNode = serde_json::from_str(r#"{"$type":"widget","Type":5}"#).unwrap();
    let LayoutNode::Widget(widget) = node else {
        panic!("expected widget");
    };
    assert_eq!(widget.kind, WidgetKind::Network);
    assert_eq!(widget.font_size, 14.0);
    assert_eq!(widget.prefix_text, "");
    assert_eq!(widget.margin, Margin::default());
    assert_eq!(widget.margin.right, 15.0);
}

#[test]
fn container_defaults_apply_when_fields_missing() {
    let node: LayoutNode = serde_json::from_str(r#"{"$type":"layout"}"#).unwrap();
    let LayoutNode::Layout(container) = node else {
        panic!("expected container");
    };
    assert_eq!(container.direction, LayoutDirection::Vertical);
    assert_eq!(container.spacing, 5.0);
    assert!(container.children.is_empty());
}

#[test]
fn partial_margin_keeps_other_defaults() {
    let node: LayoutNode =
        serde_json::from_str(r#"{"$type":"widget","Type":1,"MarginLeft":4}"#).unwrap();
    let LayoutNode::Widget(widget) = node else {
        panic!("expected widget");
    };
    assert_eq!(widget.kind, WidgetKind::Gpu);
    assert_eq!(widget.margin.left, 4.0);
    assert_eq!(widget.margin.right, 15.0);
}

#[test]
fn enum_names_accepted_case_insensitively() {
    assert_eq!(
        serde_json::from_str::<LayoutDirection>("\"horizontal\"").unwrap(),
        LayoutDirection::Horizontal
    );
    assert_eq!(
        serde_json::from_str::<WidgetKind>("\"diskList\"").unwrap(),
        WidgetKind::DiskList
    );
    assert!(serde_json::from_str::<WidgetKind>("\"fan\"").is_err());
    assert!(serde_json::from_str::<WidgetKind>("6").is_err());
}

#[test]
fn unknown_node_type_is_rejected() {
    assert!(serde_json::from_str::<LayoutNode>(r#"{"$type":"panel"}"#).is_err());
}

#[test]
fn overlay_mode_names() {
    assert_eq!(serde_json::to_string(&OverlayMode::ForceShow).unwrap(), "1");
    assert_eq!(serde_json::from_str::<OverlayMode>("2").unwrap(), OverlayMode::ForceHide);
    assert_eq!(
        serde_json::from_str::<OverlayMode>("\"forceshow\"").unwrap(),
        OverlayMode::ForceShow
    );
    assert!(serde_json::from_str::<OverlayMode>("3").is_err());
    assert_eq!(OverlayMode::default(), OverlayMode::Auto);
    assert_eq!(OverlayMode::ForceHide.to_string(), "force-hide");
}

#[test]
fn rect_dimensions() {
    let r = Rect::new(-1920, 0, 0, 1040);
    assert_eq!(r.width(), 1920);
    assert_eq!(r.height(), 1040);
}

#[test]
fn dpi_scale_from_dpi() {
    assert_eq!(DpiScale::from_dpi(96, 96), DpiScale::IDENTITY);
    assert_eq!(DpiScale::from_dpi(144, 192), DpiScale { x: 1.5, y: 2.0 });
}

#[test]
fn sample_without_disk_loads_deserializes() {
    let sample: HardwareSample = serde_json::from_str(
        r#"{"cpuPercent":12.5,"gpuPercent":null,"ramAvailableMb":2048,
            "diskReadBytesPerSec":0,"diskWriteBytesPerSec":0,
            "netDownloadBytesPerSec":0,"netUploadBytesPerSec":0}"#,
    )
    .unwrap();
    assert_eq!(sample.cpu_percent, 12.5);
    assert!(sample.disk_loads.is_empty());
}
