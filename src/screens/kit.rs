//! Shared menu plumbing: the navigation mapping every screen uses, and the
//! view model the generic renderer draws.

use bevy::prelude::*;

use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Navigation
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Up,
    Down,
    Left,
    Right,
    Activate,
    Cancel,
    Hover(usize),
    Click,
}

/// Maps a routed event onto menu navigation. Anything else is not menu
/// input and stays unconsumed.
pub fn nav_for(event: &GameEvent) -> Option<Nav> {
    match event {
        GameEvent::KeyDown(KeyCode::ArrowUp) | GameEvent::KeyDown(KeyCode::KeyW) => Some(Nav::Up),
        GameEvent::KeyDown(KeyCode::ArrowDown) | GameEvent::KeyDown(KeyCode::KeyS) => {
            Some(Nav::Down)
        }
        GameEvent::KeyDown(KeyCode::ArrowLeft) | GameEvent::KeyDown(KeyCode::KeyA) => {
            Some(Nav::Left)
        }
        GameEvent::KeyDown(KeyCode::ArrowRight) | GameEvent::KeyDown(KeyCode::KeyD) => {
            Some(Nav::Right)
        }
        GameEvent::KeyDown(KeyCode::Enter) | GameEvent::KeyDown(KeyCode::Space) => {
            Some(Nav::Activate)
        }
        GameEvent::KeyDown(KeyCode::Escape) => Some(Nav::Cancel),
        GameEvent::PointerRow(index) => Some(Nav::Hover(*index)),
        GameEvent::PointerClick => Some(Nav::Click),
        _ => None,
    }
}

pub fn cursor_up(cursor: &mut usize) {
    if *cursor > 0 {
        *cursor -= 1;
    }
}

pub fn cursor_down(cursor: &mut usize, len: usize) {
    if len > 0 && *cursor < len - 1 {
        *cursor += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// View model
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct MenuRow {
    pub label: String,
    pub enabled: bool,
}

impl MenuRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }

    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub title: String,
    pub rows: Vec<MenuRow>,
    pub selected: usize,
    pub footer: String,
}
