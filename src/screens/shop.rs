//! The village shop. Rows come from the fixed catalog; the footer shows the
//! player's gold and the last transaction result.

use super::kit::{cursor_down, cursor_up, nav_for, MenuRow, MenuView, Nav};
use super::{Screen, ScreenActions, ScreenCtx};
use crate::data::{shop_catalog, ShopOffer, ShopWare};
use crate::shared::*;

pub struct ShopScreen {
    cursor: usize,
    catalog: Vec<ShopOffer>,
    gold_shown: u32,
    status: String,
}

impl ShopScreen {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            catalog: shop_catalog(),
            gold_shown: 0,
            status: String::new(),
        }
    }

    fn row_count(&self) -> usize {
        self.catalog.len() + 1 // trailing "Leave"
    }

    fn buy(&mut self, ctx: &mut ScreenCtx) {
        let offer = &self.catalog[self.cursor];
        let player = &mut ctx.level.player;

        if let ShopWare::Cosmetic(cosmetic) = offer.ware {
            if player.owned_cosmetics.contains(&cosmetic) {
                self.status = "Already owned.".into();
                return;
            }
        }
        if !player.spend_gold(offer.price) {
            self.status = "Not enough gold.".into();
            return;
        }
        match offer.ware {
            ShopWare::Seeds(seed, count) => player.add_seeds(seed, count),
            ShopWare::Cosmetic(cosmetic) => {
                player.owned_cosmetics.push(cosmetic);
                player.equip_cosmetic(cosmetic);
            }
        }
        self.status = format!("Bought {}.", offer.label);
        self.gold_shown = player.gold;
    }
}

impl Screen for ShopScreen {
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
                cursor_down(&mut self.cursor, self.row_count());
                actions.sfx.push(SfxId::MenuMove);
            }
            Nav::Hover(index) => {
                if index < self.row_count() {
                    self.cursor = index;
                }
            }
            Nav::Activate | Nav::Click => {
                actions.sfx.push(SfxId::MenuConfirm);
                if self.cursor == self.catalog.len() {
                    actions.switch_to = Some(GameState::Play);
                } else {
                    self.buy(ctx);
                }
            }
            Nav::Cancel => actions.switch_to = Some(GameState::Play),
            Nav::Left | Nav::Right => {}
        }
        self.gold_shown = ctx.level.player.gold;
        true
    }

    fn refresh_contents(&mut self, level: &crate::level::Level) {
        self.gold_shown = level.player.gold;
        self.status.clear();
    }

    fn view(&self) -> MenuView {
        let mut rows: Vec<MenuRow> = self
            .catalog
            .iter()
            .map(|offer| MenuRow::new(format!("{} — {}g", offer.label, offer.price)))
            .collect();
        rows.push(MenuRow::new("Leave"));
        let footer = if self.status.is_empty() {
            format!("Gold: {}g", self.gold_shown)
        } else {
            format!("Gold: {}g | {}", self.gold_shown, self.status)
        };
        MenuView {
            title: "GENERAL STORE".into(),
            rows,
            selected: self.cursor,
            footer,
        }
    }
}
