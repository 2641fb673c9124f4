//! The software cursor. The OS cursor is hidden and a sprite follows the
//! mouse; glyph changes go through `CursorState::set`, which refuses the
//! one transition that would break click feedback.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// STATE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct CursorState {
    current: CursorGlyph,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            current: CursorGlyph::Arrow,
        }
    }
}

impl CursorState {
    pub fn glyph(&self) -> CursorGlyph {
        self.current
    }

    /// Applies a glyph change. No-op when unchanged. The update is skipped
    /// only when the cursor is mid click animation (current `Click`,
    /// requested `Point`) and `override_click` is false — otherwise the
    /// pointer would flicker back before the button is released.
    pub fn set(&mut self, glyph: CursorGlyph, override_click: bool) {
        if self.current == glyph {
            return;
        }
        if self.current == CursorGlyph::Click && glyph == CursorGlyph::Point && !override_click {
            return;
        }
        self.current = glyph;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPRITE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct CursorSprite;

#[derive(Resource)]
pub struct CursorAtlas {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

/// Hides the OS cursor and spawns the cursor image node. Drawn above
/// everything, including menu overlays.
pub fn setup_cursor(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.visible = false;
    }

    let image = asset_server.load("ui/cursors.png");
    let layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(16, 16),
        3,
        1,
        None,
        None,
    ));

    commands.spawn((
        CursorSprite,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(32.0),
            height: Val::Px(32.0),
            ..default()
        },
        ImageNode {
            image: image.clone(),
            texture_atlas: Some(TextureAtlas {
                layout: layout.clone(),
                index: CursorGlyph::Arrow.atlas_index(),
            }),
            ..default()
        },
        GlobalZIndex(100),
        PickingBehavior::IGNORE,
    ));

    commands.insert_resource(CursorAtlas { image, layout });
}

/// Pins the cursor node to the live mouse position and syncs its glyph.
/// Runs last in the frame so the cursor draws over whatever else changed.
pub fn sync_cursor_sprite(
    cursor: Res<CursorState>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut sprite_query: Query<(&mut Node, &mut ImageNode), With<CursorSprite>>,
) {
    let Ok((mut node, mut image)) = sprite_query.get_single_mut() else {
        return;
    };
    if let Ok(window) = window_query.get_single() {
        if let Some(pos) = window.cursor_position() {
            node.left = Val::Px(pos.x);
            node.top = Val::Px(pos.y);
        }
    }
    if let Some(ref mut atlas) = image.texture_atlas {
        atlas.index = cursor.glyph().atlas_index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_resists_point_without_override() {
        let mut cursor = CursorState::default();
        cursor.set(CursorGlyph::Point, false);
        cursor.set(CursorGlyph::Click, false);
        assert_eq!(cursor.glyph(), CursorGlyph::Click);

        cursor.set(CursorGlyph::Point, false);
        assert_eq!(cursor.glyph(), CursorGlyph::Click);

        cursor.set(CursorGlyph::Point, true);
        assert_eq!(cursor.glyph(), CursorGlyph::Point);
    }

    #[test]
    fn test_click_to_arrow_needs_no_override() {
        let mut cursor = CursorState::default();
        cursor.set(CursorGlyph::Click, false);
        cursor.set(CursorGlyph::Arrow, false);
        assert_eq!(cursor.glyph(), CursorGlyph::Arrow);
    }

    #[test]
    fn test_setting_the_same_glyph_is_a_no_op() {
        let mut cursor = CursorState::default();
        cursor.set(CursorGlyph::Arrow, false);
        assert_eq!(cursor.glyph(), CursorGlyph::Arrow);
    }
}
