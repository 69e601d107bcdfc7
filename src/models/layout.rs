// HUD layout tree: containers and widgets, persisted inside config.json

use super::wire::{EnumRepr, resolve_enum};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn default_spacing() -> f64 {
    5.0
}

fn default_font_size() -> f64 {
    14.0
}

/// Outer spacing of a node. Flattened into the node as `MarginLeft`,
/// `MarginTop`, `MarginRight`, `MarginBottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    #[serde(rename = "MarginLeft")]
    pub left: f64,
    #[serde(rename = "MarginTop")]
    pub top: f64,
    #[serde(rename = "MarginRight")]
    pub right: f64,
    #[serde(rename = "MarginBottom")]
    pub bottom: f64,
}

impl Default for Margin {
    fn default() -> Self {
        // Items would otherwise sit glued together in horizontal stacks.
        Self {
            left: 0.0,
            top: 0.0,
            right: 15.0,
            bottom: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutDirection {
    #[default]
    Vertical = 0,
    Horizontal = 1,
}

impl LayoutDirection {
    const TABLE: [(LayoutDirection, &'static str); 2] = [
        (LayoutDirection::Vertical, "Vertical"),
        (LayoutDirection::Horizontal, "Horizontal"),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Cpu = 0,
    Gpu = 1,
    Ram = 2,
    Disk = 3,
    DiskList = 4,
    Network = 5,
}

impl WidgetKind {
    const TABLE: [(WidgetKind, &'static str); 6] = [
        (WidgetKind::Cpu, "Cpu"),
        (WidgetKind::Gpu, "Gpu"),
        (WidgetKind::Ram, "Ram"),
        (WidgetKind::Disk, "Disk"),
        (WidgetKind::DiskList, "DiskList"),
        (WidgetKind::Network, "Network"),
    ];
}

impl Serialize for LayoutDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for LayoutDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        resolve_enum(EnumRepr::deserialize(deserializer)?, &Self::TABLE)
    }
}

impl Serialize for WidgetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for WidgetKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        resolve_enum(EnumRepr::deserialize(deserializer)?, &Self::TABLE)
    }
}

/// A node of the layout tree. Serialized with a `$type` discriminator
/// (`"layout"` or `"widget"`) and PascalCase fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type", rename_all = "lowercase")]
pub enum LayoutNode {
    Layout(ContainerNode),
    Widget(WidgetNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerNode {
    #[serde(default)]
    pub direction: LayoutDirection,
    /// Space between children, device-independent units.
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    #[serde(default)]
    pub children: Vec<LayoutNode>,
    #[serde(flatten)]
    pub margin: Margin,
}

impl ContainerNode {
    pub fn new(direction: LayoutDirection, spacing: f64, children: Vec<LayoutNode>) -> Self {
        Self {
            direction,
            spacing,
            children,
            margin: Margin::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WidgetNode {
    #[serde(rename = "Type")]
    pub kind: WidgetKind,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub prefix_text: String,
    #[serde(flatten)]
    pub margin: Margin,
}

impl WidgetNode {
    pub fn new(kind: WidgetKind, prefix_text: impl Into<String>) -> Self {
        Self {
            kind,
            font_size: default_font_size(),
            prefix_text: prefix_text.into(),
            margin: Margin::default(),
        }
    }
}

/// Layout used when config.json has none: CPU and RAM stacked vertically.
pub fn default_layout() -> Vec<LayoutNode> {
    vec![LayoutNode::Layout(ContainerNode::new(
        LayoutDirection::Vertical,
        2.0,
        vec![
            LayoutNode::Widget(WidgetNode::new(WidgetKind::Cpu, "CPU: ")),
            LayoutNode::Widget(WidgetNode::new(WidgetKind::Ram, "RAM: ")),
        ],
    ))]
}
