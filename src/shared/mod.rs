//! Shared states, events, and constants for Cloverfall.
//!
//! This is the type contract. Every domain module imports from here;
//! collaborator structs (player, level, screens) live in their own modules.

use bevy::prelude::*;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// The orchestrator's screen state. Owned by `game::GameContext`, not by
/// Bevy's `States` machinery: `SaveAndResume` must resolve to `Play` within
/// the same `switch_state` call, which a deferred `NextState` cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Play,
    Pause,
    Settings,
    Shop,
    Inventory,
    PlayerTask,
    RoundEnd,
    OutgroupMenu,
    /// Transient pseudo-state: entering it saves the game and immediately
    /// rewrites the current state to `Play`.
    SaveAndResume,
}

// ═══════════════════════════════════════════════════════════════════════
// CURSOR
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorGlyph {
    Arrow,
    Point,
    Click,
}

impl CursorGlyph {
    /// Frame index into `ui/cursors.png` (3 frames, one per glyph).
    pub fn atlas_index(self) -> usize {
        match self {
            CursorGlyph::Arrow => 0,
            CursorGlyph::Point => 1,
            CursorGlyph::Click => 2,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT / APPLICATION EVENTS — the closed routing union
// ═══════════════════════════════════════════════════════════════════════

/// Everything the per-frame router can see, as one closed enum.
///
/// Hardware events (quit, mouse, keys) are collected from the engine each
/// frame; the rest are application events sent by collaborators (menus,
/// level, tutorial) through `EventWriter<GameEvent>` and drained into the
/// same queue. Routing order: orchestrator handler, then the active menu
/// when paused, then the level; the first consumer short-circuits.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum GameEvent {
    Quit,
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    KeyDown(KeyCode),
    /// Pointer hover over menu row `index` (from UI picking observers).
    PointerRow(usize),
    /// Pointer click on the hovered menu row.
    PointerClick,
    OpenInventory,
    /// Raised by the level when the player trades with the merchant.
    OpenShop,
    ShowDialogue(&'static str),
    AdvanceDialogue,
    SetCursor(CursorGlyph),
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS CARRIED BY THE PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ToolKind {
    Hoe,
    WateringCan,
    Scythe,
}

impl ToolKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ToolKind::Hoe => "Hoe",
            ToolKind::WateringCan => "Watering Can",
            ToolKind::Scythe => "Scythe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SeedKind {
    Tomato,
    Corn,
}

impl SeedKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SeedKind::Tomato => "Tomato Seeds",
            SeedKind::Corn => "Corn Seeds",
        }
    }
}

/// Cosmetic wearables. Goggles are special-cased by the frame pipeline:
/// wearing them applies the vision-blur effect while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Cosmetic {
    Goggles,
    Horn,
    Necklace,
    Hat,
}

impl Cosmetic {
    pub const ALL: [Cosmetic; 4] = [
        Cosmetic::Goggles,
        Cosmetic::Horn,
        Cosmetic::Necklace,
        Cosmetic::Hat,
    ];
}

/// Soil tile condition, shared between the level simulation and the save
/// snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SoilState {
    Untilled,
    Tilled,
    Watered,
}

/// Which social group the player currently plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum PlayerGroup {
    #[default]
    Ingroup,
    Outgroup,
}

// ═══════════════════════════════════════════════════════════════════════
// AUDIO
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SfxId {
    MenuMove,
    MenuConfirm,
    Save,
    RoundBell,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx: SfxId,
}

// ═══════════════════════════════════════════════════════════════════════
// MENU THEME — one look for every screen
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct MenuTheme {
    pub bg_overlay: Color,
    pub panel_bg: Color,
    pub panel_border: Color,
    pub panel_width: f32,
    pub panel_padding: f32,
    pub panel_gap: f32,
    pub panel_border_width: f32,
    pub text_color: Color,
    pub text_color_selected: Color,
    pub text_color_disabled: Color,
    pub title_font_size: f32,
    pub row_font_size: f32,
    pub hint_font_size: f32,
}

impl Default for MenuTheme {
    fn default() -> Self {
        Self {
            bg_overlay: Color::srgba(0.0, 0.0, 0.0, 0.45),
            panel_bg: Color::srgba(0.13, 0.10, 0.08, 0.92),
            panel_border: Color::srgb(0.55, 0.42, 0.25),
            panel_width: 380.0,
            panel_padding: 18.0,
            panel_gap: 10.0,
            panel_border_width: 2.0,
            text_color: Color::srgb(0.92, 0.89, 0.82),
            text_color_selected: Color::srgb(1.0, 0.85, 0.4),
            text_color_disabled: Color::srgb(0.55, 0.52, 0.48),
            title_font_size: 28.0,
            row_font_size: 18.0,
            hint_font_size: 12.0,
        }
    }
}

/// The UI font handle, loaded once at startup.
#[derive(Resource, Debug, Clone)]
pub struct UiFontHandle(pub Handle<Font>);

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const PIXEL_SCALE: f32 = 3.0;
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// Wall-clock seconds of unpaused play per round.
pub const ROUND_END_SECONDS: f32 = 15.0 * 60.0;
/// Rounds run 1..=MAX_ROUND; the counter saturates, it never wraps.
pub const MAX_ROUND: u32 = 12;

/// Cutscene fast-forward multiplier while the key is held.
pub const FAST_FORWARD_SCALE: f32 = 5.0;

/// Dialogue textbox footprint, anchored bottom-center of the screen.
pub const TEXTBOX_SIZE: (f32, f32) = (493.0, 264.0);

pub fn textbox_anchor() -> Vec2 {
    Vec2::new(
        SCREEN_WIDTH / 2.0 - TEXTBOX_SIZE.0 / 2.0,
        SCREEN_HEIGHT - TEXTBOX_SIZE.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_main_menu() {
        assert_eq!(GameState::default(), GameState::MainMenu);
    }

    #[test]
    fn test_cursor_atlas_indices_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for glyph in [CursorGlyph::Arrow, CursorGlyph::Point, CursorGlyph::Click] {
            assert!(seen.insert(glyph.atlas_index()));
        }
    }

    #[test]
    fn test_textbox_anchor_is_bottom_centered() {
        let anchor = textbox_anchor();
        assert_eq!(anchor.x, (SCREEN_WIDTH - TEXTBOX_SIZE.0) / 2.0);
        assert_eq!(anchor.y, SCREEN_HEIGHT - TEXTBOX_SIZE.1);
    }
}
