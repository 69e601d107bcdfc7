// Overlay visibility mode (persisted in config.json)

use super::wire::{EnumRepr, resolve_enum};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Manual override state. `Auto` follows target-process detection.
///
/// Stored as its integer index (`"Mode": 1`); names are accepted on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OverlayMode {
    #[default]
    Auto = 0,
    ForceShow = 1,
    ForceHide = 2,
}

impl OverlayMode {
    const TABLE: [(OverlayMode, &'static str); 3] = [
        (OverlayMode::Auto, "Auto"),
        (OverlayMode::ForceShow, "ForceShow"),
        (OverlayMode::ForceHide, "ForceHide"),
    ];
}

impl Serialize for OverlayMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for OverlayMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        resolve_enum(EnumRepr::deserialize(deserializer)?, &Self::TABLE)
    }
}

impl fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverlayMode::Auto => "auto",
            OverlayMode::ForceShow => "force-show",
            OverlayMode::ForceHide => "force-hide",
        };
        f.write_str(s)
    }
}
