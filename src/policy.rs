// Visibility policy: mode x game-detection decision table and hotkey transitions

use crate::models::OverlayMode;

/// Whether the overlay should be visible this tick.
pub fn should_show(mode: OverlayMode, game_active: bool) -> bool {
    match mode {
        OverlayMode::ForceShow => true,
        OverlayMode::ForceHide => false,
        OverlayMode::Auto => game_active,
    }
}

/// Mode after a hotkey press.
///
/// The transition always flips what the user currently sees, and lands in a
/// mode the next `Auto` poll will not immediately override:
///
/// | visible | game active | next mode   |
/// |---------|-------------|-------------|
/// | yes     | yes         | `ForceHide` |
/// | yes     | no          | `Auto`      |
/// | no      | yes         | `Auto`      |
/// | no      | no          | `ForceShow` |
pub fn next_mode(mode: OverlayMode, game_active: bool) -> OverlayMode {
    match (should_show(mode, game_active), game_active) {
        (true, true) => OverlayMode::ForceHide,
        (true, false) => OverlayMode::Auto,
        (false, true) => OverlayMode::Auto,
        (false, false) => OverlayMode::ForceShow,
    }
}
