use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use voxbox_blocks::{BlockType, Selection};

/// Number of hotbar slots; keys `1`..`9` then `0`.
pub const HOTBAR_SLOTS: usize = 10;

#[derive(Deserialize)]
struct HotbarConfig {
    items: Vec<String>,
}

/// Fixed mapping from number keys to what the viewer holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hotbar {
    slots: [Selection; HOTBAR_SLOTS],
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::from_items(&[
            BlockType::Grass,
            BlockType::Dirt,
            BlockType::Stone,
            BlockType::Brick,
        ])
    }
}

impl Hotbar {
    /// Fills slots in key order; remaining slots are the empty hand.
    pub fn from_items(items: &[BlockType]) -> Self {
        let mut slots = [Selection::EmptyHand; HOTBAR_SLOTS];
        for (slot, b) in slots.iter_mut().zip(items) {
            *slot = Selection::Block(*b);
        }
        Self { slots }
    }

    /// Unknown names keep their slot but hold nothing.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        if names.len() > HOTBAR_SLOTS {
            log::warn!(
                "hotbar lists {} items; only the first {} are used",
                names.len(),
                HOTBAR_SLOTS
            );
        }
        let mut slots = [Selection::EmptyHand; HOTBAR_SLOTS];
        for (slot, name) in slots.iter_mut().zip(names) {
            let name = name.as_ref();
            match BlockType::from_name(name) {
                Some(b) => *slot = Selection::Block(b),
                None => log::warn!("hotbar: unknown block '{}', slot left empty", name),
            }
        }
        Self { slots }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: HotbarConfig = toml::from_str(s)?;
        Ok(Self::from_names(&cfg.items))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// What number key `key` (0..=9) selects.
    pub fn slot_for_key(&self, key: u8) -> Option<Selection> {
        let idx = match key {
            1..=9 => key as usize - 1,
            0 => HOTBAR_SLOTS - 1,
            _ => return None,
        };
        self.slots.get(idx).copied()
    }

    #[inline]
    pub fn slots(&self) -> &[Selection; HOTBAR_SLOTS] {
        &self.slots
    }
}

/// The viewer's current hand. Latest selection wins; no history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionState {
    current: Selection,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(Selection::Block(BlockType::Grass))
    }
}

impl SelectionState {
    pub fn new(initial: Selection) -> Self {
        Self { current: initial }
    }

    #[inline]
    pub fn select(&mut self, s: Selection) {
        self.current = s;
    }

    #[inline]
    pub fn current(&self) -> Selection {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hotbar_matches_number_row() {
        let h = Hotbar::default();
        assert_eq!(h.slot_for_key(1), Some(Selection::Block(BlockType::Grass)));
        assert_eq!(h.slot_for_key(2), Some(Selection::Block(BlockType::Dirt)));
        assert_eq!(h.slot_for_key(3), Some(Selection::Block(BlockType::Stone)));
        assert_eq!(h.slot_for_key(4), Some(Selection::Block(BlockType::Brick)));
        for key in [5, 6, 7, 8, 9, 0] {
            assert_eq!(h.slot_for_key(key), Some(Selection::EmptyHand));
        }
        assert_eq!(h.slot_for_key(10), None);
    }

    #[test]
    fn toml_names_map_in_order_and_unknowns_are_empty() {
        let h = Hotbar::from_toml_str(r#"items = ["brick", "lava", "bedrock"]"#).unwrap();
        assert_eq!(h.slot_for_key(1), Some(Selection::Block(BlockType::Brick)));
        assert_eq!(h.slot_for_key(2), Some(Selection::EmptyHand));
        assert_eq!(h.slot_for_key(3), Some(Selection::Block(BlockType::Bedrock)));
        assert!(Hotbar::from_toml_str("items = 3").is_err());
    }

    #[test]
    fn key_zero_is_the_last_slot() {
        let names: Vec<String> = (0..12).map(|_| "stone".to_string()).collect();
        let h = Hotbar::from_names(&names);
        assert_eq!(h.slot_for_key(0), Some(Selection::Block(BlockType::Stone)));
        assert!(h.slots().iter().all(|s| !s.is_empty_hand()));
    }
}
