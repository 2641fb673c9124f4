//! Data layer — the hard-coded game-design tables.
//!
//! Dialogue lines, shop offers, round-end rewards, player tasks, and the
//! keybinding legend text all live here so no other module embeds content.
//! Registries are plain constructors; `main.rs` inserts them as resources.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// DIALOGUE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct DialogueRegistry {
    entries: HashMap<&'static str, Vec<&'static str>>,
}

impl DialogueRegistry {
    pub fn standard() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "intro_to_game",
            vec![
                "Welcome to Cloverfall!",
                "This plot is yours now. Till it, water it, and keep the rounds turning.",
                "The in-group meets by the gate; you can switch company later if you like.",
            ],
        );
        entries.insert(
            "meet_hazel",
            vec![
                "Hazel: Morning! Those tomatoes won't water themselves.",
                "Hazel: Come find me when the round bell rings.",
            ],
        );
        entries.insert(
            "meet_bram",
            vec![
                "Bram: New around here? The soil past the fence is no good.",
                "Bram: Stick to the plot and you'll do fine.",
            ],
        );
        entries.insert(
            "tutorial_move",
            vec!["Use WASD or the arrow keys to walk around your plot."],
        );
        entries.insert(
            "tutorial_till",
            vec!["Equip the hoe and press Space to till the tile ahead of you."],
        );
        entries.insert(
            "tutorial_water",
            vec!["Switch to the watering can and wet the tilled soil."],
        );
        entries.insert(
            "tutorial_plant",
            vec!["Press Q to tuck a seed into worked soil. Done — you're a farmer now!"],
        );
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&Vec<&'static str>> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SHOP
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopWare {
    Seeds(SeedKind, u32),
    Cosmetic(Cosmetic),
}

#[derive(Debug, Clone)]
pub struct ShopOffer {
    pub label: &'static str,
    pub price: u32,
    pub ware: ShopWare,
}

pub fn shop_catalog() -> Vec<ShopOffer> {
    vec![
        ShopOffer {
            label: "Tomato Seeds (x5)",
            price: 40,
            ware: ShopWare::Seeds(SeedKind::Tomato, 5),
        },
        ShopOffer {
            label: "Corn Seeds (x5)",
            price: 50,
            ware: ShopWare::Seeds(SeedKind::Corn, 5),
        },
        ShopOffer {
            label: "Goggles",
            price: 150,
            ware: ShopWare::Cosmetic(Cosmetic::Goggles),
        },
        ShopOffer {
            label: "Straw Hat",
            price: 120,
            ware: ShopWare::Cosmetic(Cosmetic::Hat),
        },
        ShopOffer {
            label: "Necklace",
            price: 200,
            ware: ShopWare::Cosmetic(Cosmetic::Necklace),
        },
    ]
}

/// Pool the round-end screen draws its three offers from.
pub fn round_offer_pool() -> Vec<ShopOffer> {
    vec![
        ShopOffer {
            label: "Bag of Tomato Seeds (x10)",
            price: 0,
            ware: ShopWare::Seeds(SeedKind::Tomato, 10),
        },
        ShopOffer {
            label: "Bag of Corn Seeds (x10)",
            price: 0,
            ware: ShopWare::Seeds(SeedKind::Corn, 10),
        },
        ShopOffer {
            label: "Goggles",
            price: 0,
            ware: ShopWare::Cosmetic(Cosmetic::Goggles),
        },
        ShopOffer {
            label: "Festival Horn",
            price: 0,
            ware: ShopWare::Cosmetic(Cosmetic::Horn),
        },
        ShopOffer {
            label: "Straw Hat",
            price: 0,
            ware: ShopWare::Cosmetic(Cosmetic::Hat),
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER TASKS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskGoal {
    TillThreeTiles,
    WaterATile,
    PlantASeed,
    EarnGold(u32),
}

#[derive(Debug, Clone)]
pub struct TaskDef {
    pub label: &'static str,
    pub goal: TaskGoal,
}

pub fn task_list() -> Vec<TaskDef> {
    vec![
        TaskDef {
            label: "Till three tiles of soil",
            goal: TaskGoal::TillThreeTiles,
        },
        TaskDef {
            label: "Water a tilled tile",
            goal: TaskGoal::WaterATile,
        },
        TaskDef {
            label: "Plant your first seed",
            goal: TaskGoal::PlantASeed,
        },
        TaskDef {
            label: "Hold 300 gold",
            goal: TaskGoal::EarnGold(300),
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════
// KEYBINDING LEGEND TEXT
// ═══════════════════════════════════════════════════════════════════════

/// Legend descriptions, keyed by legend entry id. A `|` splits a
/// description into multiple lines.
pub fn legend_text(id: &str) -> Option<&'static str> {
    match id {
        "legend task hint" => Some("Check your tasks from the pause menu"),
        "legend lclick" => Some("Select menu entries"),
        "legend space" => Some("Use the equipped tool|on the tile ahead"),
        "legend q" => Some("Plant the selected seed"),
        "legend e" => Some("Talk to a villager"),
        "legend i" => Some("Open your inventory"),
        "legend rshift" => Some("Hold to fast-forward|a running cutscene"),
        "legend esc" => Some("Pause the game"),
        "legend f1" => Some("Toggle this panel"),
        _ => None,
    }
}
