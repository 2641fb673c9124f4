//! Task list. Read-only: rows show the fixed task set with done markers
//! computed from the live level on entry.

use super::kit::{cursor_down, cursor_up, nav_for, MenuRow, MenuView, Nav};
use super::{Screen, ScreenActions, ScreenCtx};
use crate::data::{task_list, TaskDef, TaskGoal};
use crate::level::Level;
use crate::shared::*;

pub struct PlayerTaskScreen {
    cursor: usize,
    tasks: Vec<TaskDef>,
    done: Vec<bool>,
}

fn task_done(goal: TaskGoal, level: &Level) -> bool {
    match goal {
        TaskGoal::TillThreeTiles => level.soil.worked_tile_count() >= 3,
        TaskGoal::WaterATile => level.soil.any_watered(),
        TaskGoal::PlantASeed => level.soil.any_planted(),
        TaskGoal::EarnGold(amount) => level.player.gold >= amount,
    }
}

impl PlayerTaskScreen {
    pub fn new() -> Self {
        let tasks = task_list();
        let done = vec![false; tasks.len()];
        Self {
            cursor: 0,
            tasks,
            done,
        }
    }

    /// Tasks, then "Change company...", then "Back".
    fn row_count(&self) -> usize {
        self.tasks.len() + 2
    }

    fn outgroup_row(&self) -> usize {
        self.tasks.len()
    }

    fn back_row(&self) -> usize {
        self.tasks.len() + 1
    }
}

impl Screen for PlayerTaskScreen {
    fn handle_event(
        &mut self,
        event: &GameEvent,
        _ctx: &mut ScreenCtx,
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
                if self.cursor == self.outgroup_row() {
                    actions.sfx.push(SfxId::MenuConfirm);
                    actions.switch_to = Some(GameState::OutgroupMenu);
                } else if self.cursor == self.back_row() {
                    actions.sfx.push(SfxId::MenuConfirm);
                    actions.switch_to = Some(GameState::Pause);
                }
            }
            Nav::Cancel => actions.switch_to = Some(GameState::Pause),
            Nav::Left | Nav::Right => {}
        }
        true
    }

    fn refresh_contents(&mut self, level: &Level) {
        self.done = self
            .tasks
            .iter()
            .map(|task| task_done(task.goal, level))
            .collect();
    }

    fn view(&self) -> MenuView {
        let mut rows: Vec<MenuRow> = self
            .tasks
            .iter()
            .zip(&self.done)
            .map(|(task, done)| {
                let marker = if *done { "[x]" } else { "[ ]" };
                MenuRow::disabled(format!("{marker} {}", task.label))
            })
            .collect();
        rows.push(MenuRow::new("Change company..."));
        rows.push(MenuRow::new("Back"));
        let finished = self.done.iter().filter(|d| **d).count();
        MenuView {
            title: "TASKS".into(),
            rows,
            selected: self.cursor,
            footer: format!("{finished}/{} complete", self.tasks.len()),
        }
    }
}
