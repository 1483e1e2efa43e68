//! The fixed set of pieces that go on the grill at the start of a run.

use std::collections::HashSet;

use super::item::{Item, MeatKind};
use crate::grill::GrillError;

/// The pieces on the grill, keyed by name.
///
/// Built once and never resized. Items are kept in roster order so that
/// "first matching item" scans are deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct Roster {
    items: Vec<Item>,
}

impl Roster {
    /// Builds a roster from `(kind, name)` pairs, rejecting duplicate names.
    pub fn new<I, S>(entries: I) -> Result<Self, GrillError>
    where
        I: IntoIterator<Item = (MeatKind, S)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for (kind, name) in entries {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(GrillError::DuplicateItem(name));
            }
            items.push(Item::new(kind, name));
        }
        if items.is_empty() {
            return Err(GrillError::EmptyRoster);
        }
        Ok(Self { items })
    }

    /// The family roster: two chorizos, two morcillas, a short rib, a flank and a chicken.
    pub fn family() -> Self {
        let items = vec![
            Item::new(MeatKind::Chorizo, "chorizo-1"),
            Item::new(MeatKind::Chorizo, "chorizo-2"),
            Item::new(MeatKind::Morcilla, "morcilla-1"),
            Item::new(MeatKind::Morcilla, "morcilla-2"),
            Item::new(MeatKind::ShortRib, "short-rib-1"),
            Item::new(MeatKind::Flank, "flank-1"),
            Item::new(MeatKind::Chicken, "chicken-1"),
        ];
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }
}
