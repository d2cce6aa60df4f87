//! The clock engine: field, slots, liquid and history in one owner.

use chrono::{NaiveTime, Timelike};
use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use waterclock_core::{Cell, Edit, EditAction, EngineConfig, Field, HEIGHT, SLOT_COUNT, WIDTH};
use waterclock_glyphs::update_colon;

use crate::drain::{DigitSlot, DrainController};
use crate::history::FieldHistory;
use crate::motion::LiquidMotion;

/// Water clock state.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Current cell grid.
    field: Field,
    /// Fields from the previous frames, for the renderer.
    history: FieldHistory,
    /// Digit slots and their drains.
    drains: DrainController,
    /// Liquid schedules and drop position.
    motion: LiquidMotion,
    /// Single source of randomness for every rule.
    rng: StdRng,
    /// Frames advanced so far.
    frame_count: u64,
}

impl Engine {
    /// Build the clock face for `now`: terrain, the four digits and the colon.
    pub fn new(now: NaiveTime, config: &EngineConfig, seed: u64) -> Self {
        let mut field = Field::terrain();
        let drains = DrainController::new(&mut field, now, config.opening_period);
        update_colon(&mut field, now.second());
        debug!("engine started at {now} with seed {seed}");

        Self {
            field,
            history: FieldHistory::new(),
            drains,
            motion: LiquidMotion::new(config),
            rng: StdRng::seed_from_u64(seed),
            frame_count: 0,
        }
    }

    /// Advance one frame to time `now`, then apply `edit` if given.
    pub fn update(&mut self, now: NaiveTime, edit: Option<Edit>) {
        self.history.push(&self.field);
        self.frame_count += 1;

        self.drains.update(&mut self.field, now);
        update_colon(&mut self.field, now.second());
        self.motion.step(&mut self.field, self.frame_count, now, &mut self.rng);

        if let Some(edit) = edit {
            self.apply_edit(edit);
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn slots(&self) -> &[DigitSlot; SLOT_COUNT] {
        self.drains.slots()
    }

    pub fn history(&self) -> &FieldHistory {
        &self.history
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Apply a user edit. Targets outside the visible field are ignored.
    fn apply_edit(&mut self, edit: Edit) {
        let in_view =
            (0..WIDTH as isize).contains(&edit.x) && (0..HEIGHT as isize).contains(&edit.y);
        if !in_view {
            return;
        }
        let (x, y) = (edit.x as usize, edit.y as usize);

        match edit.action {
            EditAction::SetWall => self.field.set(x, y, Cell::Wall),
            EditAction::SetBackground => self.field.set(x, y, Cell::Background),
            EditAction::Drag(direction) => {
                let (dx, dy) = direction.offset();
                let target = (edit.x + dx, edit.y + dy);
                let open = self.field.cell(target.0, target.1) == Some(Cell::Background);
                if open && self.field.get(x, y).is_liquid() {
                    let to = (target.0 as usize, target.1 as usize);
                    self.field.move_liquid((x, y), to);
                }
            }
        }
    }
}
