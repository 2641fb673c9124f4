//! Round summary. `switch_state(RoundEnd)` resets the screen and draws
//! three reward offers from the pool; picking one (or declining) grants it,
//! bumps the round counter, and resumes play.

use rand::seq::SliceRandom;
use rand::RngCore;

use super::kit::{cursor_down, cursor_up, nav_for, MenuRow, MenuView, Nav};
use super::{Screen, ScreenActions, ScreenCtx};
use crate::data::{round_offer_pool, ShopOffer, ShopWare};
use crate::shared::*;

pub const OFFER_COUNT: usize = 3;

pub struct RoundEndScreen {
    cursor: usize,
    offers: Vec<ShopOffer>,
}

impl RoundEndScreen {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            offers: Vec::new(),
        }
    }

    fn row_count(&self) -> usize {
        self.offers.len() + 1
    }

    fn activate(&mut self, ctx: &mut ScreenCtx, actions: &mut ScreenActions) {
        actions.sfx.push(SfxId::MenuConfirm);
        if let Some(offer) = self.offers.get(self.cursor) {
            let player = &mut ctx.level.player;
            match offer.ware {
                ShopWare::Seeds(seed, count) => player.add_seeds(seed, count),
                ShopWare::Cosmetic(cosmetic) => {
                    if !player.owned_cosmetics.contains(&cosmetic) {
                        player.owned_cosmetics.push(cosmetic);
                    }
                }
            }
        }
        actions.advance_round = true;
        actions.switch_to = Some(GameState::Play);
    }
}

impl Screen for RoundEndScreen {
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
            Nav::Activate | Nav::Click => self.activate(ctx, actions),
            // The round must be acknowledged; Escape does not skip it.
            Nav::Cancel | Nav::Left | Nav::Right => {}
        }
        true
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.offers.clear();
    }

    fn generate_offers(&mut self, rng: &mut dyn RngCore) {
        let mut pool = round_offer_pool();
        pool.shuffle(rng);
        pool.truncate(OFFER_COUNT);
        self.offers = pool;
    }

    fn view(&self) -> MenuView {
        let mut rows: Vec<MenuRow> = self
            .offers
            .iter()
            .map(|offer| MenuRow::new(format!("Take: {}", offer.label)))
            .collect();
        rows.push(MenuRow::new("Continue without a reward"));
        MenuView {
            title: "ROUND COMPLETE".into(),
            rows,
            selected: self.cursor,
            footer: "Pick a reward to start the next round".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::level::Level;
    use crate::player::ControlMap;
    use crate::save::SaveFile;
    use bevy::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn prepared_screen() -> RoundEndScreen {
        let mut screen = RoundEndScreen::new();
        screen.reset();
        let mut rng = StdRng::seed_from_u64(42);
        Screen::generate_offers(&mut screen, &mut rng);
        screen
    }

    #[test]
    fn test_generate_draws_exactly_three_offers() {
        let screen = prepared_screen();
        assert_eq!(screen.offers.len(), OFFER_COUNT);
        assert_eq!(screen.view().rows.len(), OFFER_COUNT + 1);
    }

    #[test]
    fn test_taking_an_offer_grants_and_advances() {
        let mut screen = prepared_screen();
        let mut save = SaveFile::default();
        let mut level = Level::new(&save, ControlMap::default());
        let mut settings = Settings::default();
        let seeds_before: u32 = level.player.seeds.values().sum();
        let cosmetics_before = level.player.owned_cosmetics.len();
        let mut ctx = ScreenCtx {
            level: &mut level,
            save: &mut save,
            settings: &mut settings,
        };
        let mut actions = ScreenActions::default();
        screen.handle_event(&GameEvent::KeyDown(KeyCode::Enter), &mut ctx, &mut actions);

        assert!(actions.advance_round);
        assert_eq!(actions.switch_to, Some(GameState::Play));
        let seeds_after: u32 = ctx.level.player.seeds.values().sum();
        let granted = seeds_after > seeds_before
            || ctx.level.player.owned_cosmetics.len() > cosmetics_before;
        assert!(granted, "picking an offer must grant something");
    }

    #[test]
    fn test_declining_still_advances_the_round() {
        let mut screen = prepared_screen();
        screen.cursor = screen.offers.len();
        let mut save = SaveFile::default();
        let mut level = Level::new(&save, ControlMap::default());
        let mut settings = Settings::default();
        let mut ctx = ScreenCtx {
            level: &mut level,
            save: &mut save,
            settings: &mut settings,
        };
        let mut actions = ScreenActions::default();
        screen.handle_event(&GameEvent::KeyDown(KeyCode::Enter), &mut ctx, &mut actions);
        assert!(actions.advance_round);
    }

    #[test]
    fn test_escape_does_not_skip_the_summary() {
        let mut screen = prepared_screen();
        let mut save = SaveFile::default();
        let mut level = Level::new(&save, ControlMap::default());
        let mut settings = Settings::default();
        let mut ctx = ScreenCtx {
            level: &mut level,
            save: &mut save,
            settings: &mut settings,
        };
        let mut actions = ScreenActions::default();
        screen.handle_event(&GameEvent::KeyDown(KeyCode::Escape), &mut ctx, &mut actions);
        assert_eq!(actions.switch_to, None);
        assert!(!actions.advance_round);
    }
}
