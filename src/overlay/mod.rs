//! HUD overlays: the keybinding legend (with its toggle label), the
//! cutscene fast-forward hint, and the goggles vision effect.

pub mod blur;
pub mod fast_forward;
pub mod keybindings;

use bevy::prelude::*;

pub use keybindings::KeybindingsPanel;

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeybindingsPanel>()
            .add_systems(
                Startup,
                (
                    keybindings::spawn_legend_label,
                    fast_forward::spawn_fast_forward_hint,
                    blur::spawn_vision_blur,
                ),
            )
            .add_systems(
                Update,
                (
                    keybindings::toggle_legend_panel,
                    keybindings::sync_legend_panel,
                    keybindings::tint_legend_label,
                    fast_forward::sync_fast_forward_hint,
                    blur::sync_vision_blur,
                ),
            );
    }
}
