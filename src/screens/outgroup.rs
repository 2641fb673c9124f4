//! Group-switch prompt: stay with the in-group or join the out-group.

use super::kit::{cursor_down, cursor_up, nav_for, MenuRow, MenuView, Nav};
use super::{Screen, ScreenActions, ScreenCtx};
use crate::shared::*;

const OPTIONS: &[(&str, PlayerGroup)] = &[
    ("Stay with the in-group", PlayerGroup::Ingroup),
    ("Join the out-group", PlayerGroup::Outgroup),
];

pub struct OutgroupScreen {
    cursor: usize,
}

impl OutgroupScreen {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }
}

impl Screen for OutgroupScreen {
    fn handle_event(
        &mut self,
        event: &GameEvent,
        ctx: &mut ScreenCtx,
        actions: &mut ScreenActions,
    ) -> bool {
        let Some(nav) = nav_for(event) else {
            return false;
        };
        match nav {
            Nav::Up => {
                cursor_up(&mut self.cursor);
                actions.sfx.push(SfxId::MenuMove);
            }
            Nav::Down => {
                cursor_down(&mut self.cursor, OPTIONS.len());
                actions.sfx.push(SfxId::MenuMove);
            }
            Nav::Hover(index) => {
                if index < OPTIONS.len() {
                    self.cursor = index;
                }
            }
            Nav::Activate | Nav::Click => {
                actions.sfx.push(SfxId::MenuConfirm);
                ctx.level.player.group = OPTIONS[self.cursor].1;
                actions.switch_to = Some(GameState::Play);
            }
            Nav::Cancel => actions.switch_to = Some(GameState::Play),
            Nav::Left | Nav::Right => {}
        }
        true
    }

    fn view(&self) -> MenuView {
        MenuView {
            title: "CHANGE COMPANY?".into(),
            rows: OPTIONS
                .iter()
                .map(|(label, _)| MenuRow::new(*label))
                .collect(),
            selected: self.cursor,
            footer: "Your group decides who farms beside you".into(),
        }
    }
}
