//! Recent field snapshots for flicker-free rendering.

use std::collections::VecDeque;

use waterclock_core::{Field, Species};

/// Number of past frames kept.
pub const HISTORY_DEPTH: usize = 2;

/// Ring buffer of the last [`HISTORY_DEPTH`] fields, oldest first.
///
/// The automaton never reads it; a renderer can use it to keep showing a
/// droplet's colour for a frame or two after it leaves a cell.
#[derive(Debug, Clone, Default)]
pub struct FieldHistory {
    snapshots: VecDeque<Field>,
}

impl FieldHistory {
    pub fn new() -> Self {
        Self {
            snapshots: VecDeque::with_capacity(HISTORY_DEPTH),
        }
    }

    /// Record a snapshot, dropping the oldest once full.
    pub fn push(&mut self, field: &Field) {
        if self.snapshots.len() == HISTORY_DEPTH {
            if let Some(mut oldest) = self.snapshots.pop_front() {
                oldest.clone_from(field);
                self.snapshots.push_back(oldest);
                return;
            }
        }
        self.snapshots.push_back(field.clone());
    }

    /// Snapshots from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.snapshots.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Most recent species seen at `(x, y)`, if any snapshot held liquid there.
    pub fn last_liquid(&self, x: usize, y: usize) -> Option<Species> {
        self.iter().find_map(|field| field.get(x, y).species())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waterclock_core::Cell;

    #[test]
    fn test_keeps_only_recent_frames() {
        let mut history = FieldHistory::new();
        assert!(history.is_empty());

        for species in [Species::Pale, Species::Azure, Species::Coral] {
            let mut field = Field::blank();
            field.set(3, 3, Cell::Liquid(species));
            history.push(&field);
        }

        assert_eq!(history.len(), HISTORY_DEPTH);
        let seen: Vec<Cell> = history.iter().map(|f| f.get(3, 3)).collect();
        assert_eq!(
            seen,
            vec![Cell::Liquid(Species::Coral), Cell::Liquid(Species::Azure)]
        );
    }

    #[test]
    fn test_last_liquid_prefers_newest() {
        let mut history = FieldHistory::new();
        let mut older = Field::blank();
        older.set(1, 1, Cell::Liquid(Species::Mist));
        older.set(2, 2, Cell::Liquid(Species::Mist));
        history.push(&older);

        let mut newer = Field::blank();
        newer.set(1, 1, Cell::Liquid(Species::Indigo));
        history.push(&newer);

        assert_eq!(history.last_liquid(1, 1), Some(Species::Indigo));
        assert_eq!(history.last_liquid(2, 2), Some(Species::Mist));
        assert_eq!(history.last_liquid(5, 5), None);
    }
}
