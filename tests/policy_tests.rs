// Visibility policy and hotkey transition table

use winhud::models::OverlayMode;
use winhud::policy::{next_mode, should_show};

const ALL_MODES: [OverlayMode; 3] = [
    OverlayMode::Auto,
    OverlayMode::ForceShow,
    OverlayMode::ForceHide,
];

#[test]
fn should_show_matches_decision_table() {
    assert!(should_show(OverlayMode::ForceShow, false));
    assert!(should_show(OverlayMode::ForceShow, true));
    assert!(!should_show(OverlayMode::ForceHide, false));
    assert!(!should_show(OverlayMode::ForceHide, true));
    assert!(should_show(OverlayMode::Auto, true));
    assert!(!should_show(OverlayMode::Auto, false));
}

#[test]
fn next_mode_transitions() {
    assert_eq!(next_mode(OverlayMode::Auto, true), OverlayMode::ForceHide);
    assert_eq!(next_mode(OverlayMode::ForceShow, false), OverlayMode::Auto);
    assert_eq!(next_mode(OverlayMode::ForceHide, true), OverlayMode::Auto);
    assert_eq!(next_mode(OverlayMode::Auto, false), OverlayMode::ForceShow);
}

#[test]
fn toggle_always_flips_visibility_for_stable_game_state() {
    for mode in ALL_MODES {
        for game_active in [false, true] {
            let before = should_show(mode, game_active);
            let after = should_show(next_mode(mode, game_active), game_active);
            assert_ne!(before, after, "mode={mode} game_active={game_active}");
        }
    }
}

#[test]
fn double_toggle_restores_visibility() {
    for mode in ALL_MODES {
        for game_active in [false, true] {
            let twice = next_mode(next_mode(mode, game_active), game_active);
            assert_eq!(
                should_show(twice, game_active),
                should_show(mode, game_active)
            );
        }
    }
}
