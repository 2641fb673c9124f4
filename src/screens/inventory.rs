//! Inventory screen. Rows are rebuilt from the live player whenever the
//! screen is entered (`refresh_contents`, called by `switch_state`) and
//! after every assignment, so the markers always match the player.

use super::kit::{cursor_down, cursor_up, nav_for, MenuRow, MenuView, Nav};
use super::{Screen, ScreenActions, ScreenCtx};
use crate::level::Level;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Entry {
    Tool(ToolKind),
    Seed(SeedKind),
    Cosmetic(Cosmetic),
    Close,
}

pub struct InventoryScreen {
    cursor: usize,
    entries: Vec<Entry>,
    labels: Vec<MenuRow>,
}

impl InventoryScreen {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            entries: vec![Entry::Close],
            labels: vec![MenuRow::new("Close")],
        }
    }

    fn rebuild(&mut self, level: &Level) {
        let player = &level.player;
        self.entries.clear();
        self.labels.clear();

        for tool in &player.tools {
            self.entries.push(Entry::Tool(*tool));
            let marker = if *tool == player.current_tool {
                "  [equipped]"
            } else {
                ""
            };
            self.labels
                .push(MenuRow::new(format!("{}{marker}", tool.display_name())));
        }

        let mut seeds: Vec<(SeedKind, u32)> = player.seeds.iter().map(|(k, n)| (*k, *n)).collect();
        seeds.sort_by_key(|(k, _)| k.display_name());
        for (seed, count) in seeds {
            self.entries.push(Entry::Seed(seed));
            let marker = if seed == player.current_seed {
                "  [selected]"
            } else {
                ""
            };
            self.labels.push(MenuRow::new(format!(
                "{} x{count}{marker}",
                seed.display_name()
            )));
        }

        for cosmetic in Cosmetic::ALL {
            if player.owned_cosmetics.contains(&cosmetic) {
                self.entries.push(Entry::Cosmetic(cosmetic));
                let marker = if player.equipped_cosmetics.contains(&cosmetic) {
                    "  [worn]"
                } else {
                    ""
                };
                self.labels
                    .push(MenuRow::new(format!("{cosmetic:?}{marker}")));
            }
        }

        self.entries.push(Entry::Close);
        self.labels.push(MenuRow::new("Close"));

        if self.cursor >= self.entries.len() {
            self.cursor = self.entries.len() - 1;
        }
    }

    fn activate(&mut self, ctx: &mut ScreenCtx, actions: &mut ScreenActions) {
        match self.entries[self.cursor] {
            Entry::Tool(tool) => ctx.level.player.assign_tool(tool),
            Entry::Seed(seed) => ctx.level.player.assign_seed(seed),
            Entry::Cosmetic(cosmetic) => {
                let equipped = &mut ctx.level.player.equipped_cosmetics;
                if let Some(at) = equipped.iter().position(|c| *c == cosmetic) {
                    equipped.remove(at);
                } else {
                    ctx.level.player.equip_cosmetic(cosmetic);
                }
            }
            Entry::Close => {
                actions.switch_to = Some(GameState::Play);
                return;
            }
        }
        self.rebuild(ctx.level);
    }
}

impl Screen for InventoryScreen {
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
                cursor_down(&mut self.cursor, self.entries.len());
                actions.sfx.push(SfxId::MenuMove);
            }
            Nav::Hover(index) => {
                if index < self.entries.len() {
                    self.cursor = index;
                }
            }
            Nav::Activate | Nav::Click => {
                actions.sfx.push(SfxId::MenuConfirm);
                self.activate(ctx, actions);
            }
            Nav::Cancel => actions.switch_to = Some(GameState::Play),
            Nav::Left | Nav::Right => {}
        }
        true
    }

    fn refresh_contents(&mut self, level: &Level) {
        self.rebuild(level);
    }

    fn view(&self) -> MenuView {
        MenuView {
            title: "INVENTORY".into(),
            rows: self.labels.clone(),
            selected: self.cursor,
            footer: "Enter: Equip/Select | Esc: Close".into(),
        }
    }
}
