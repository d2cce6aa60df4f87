//! Drain and reseal of digit slots.
//!
//! When the displayed time changes, each slot whose digit differs opens a
//! drain in its floor so the liquid held by the old glyph runs out, then
//! reseals with the new glyph once the countdown expires. Wall pixels that
//! land on liquid at reseal time are written on later frames, as soon as the
//! liquid has moved out of the way.

use chrono::{NaiveTime, Timelike};
use log::debug;
use waterclock_core::{Field, SLOT_COUNT};
use waterclock_glyphs::{close_drain, open_drain, seal, stamp_digit};

/// Extra frames (or fewer, when negative) a drain stays open, keyed by the
/// digit being installed. Glyphs with more channel volume need longer.
pub const DIGIT_EXTENSION: [i32; 10] = [4, -6, 2, 2, 0, 2, 4, -4, 6, 4];

/// Slot pairs that drain together when both change at once.
const PAIRS: [[usize; 2]; 2] = [[0, 1], [2, 3]];

/// Digits HH:MM shown at `now`.
pub fn intended_digits(now: NaiveTime) -> [u8; SLOT_COUNT] {
    let (h, m) = (now.hour() as u8, now.minute() as u8);
    [h / 10, h % 10, m / 10, m % 10]
}

/// Drain state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    Idle,
    /// Drain open; reseals with `pending` after `remaining` more frames.
    Draining { remaining: u32, pending: u8 },
}

/// One digit position of the clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitSlot {
    current: u8,
    phase: SlotPhase,
}

impl DigitSlot {
    fn new(current: u8) -> Self {
        Self {
            current,
            phase: SlotPhase::Idle,
        }
    }

    /// Digit currently carved into the wall.
    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn phase(&self) -> SlotPhase {
        self.phase
    }

    pub fn is_draining(&self) -> bool {
        matches!(self.phase, SlotPhase::Draining { .. })
    }

    /// Frames until reseal, or `-1` when idle.
    pub fn drain_countdown(&self) -> i32 {
        match self.phase {
            SlotPhase::Idle => -1,
            SlotPhase::Draining { remaining, .. } => remaining as i32,
        }
    }

    /// The digit this slot is heading to.
    fn target(&self) -> u8 {
        match self.phase {
            SlotPhase::Idle => self.current,
            SlotPhase::Draining { pending, .. } => pending,
        }
    }
}

/// Drives the four digit slots through `Idle → Draining → Idle`.
#[derive(Debug, Clone)]
pub struct DrainController {
    slots: [DigitSlot; SLOT_COUNT],
    /// Wall pixels per slot still waiting for liquid to clear.
    unsealed: [Vec<(usize, usize)>; SLOT_COUNT],
    opening_period: u32,
}

impl DrainController {
    /// Carve the digits for `now` into `field` and start all slots idle.
    pub fn new(field: &mut Field, now: NaiveTime, opening_period: u32) -> Self {
        let digits = intended_digits(now);
        Self {
            slots: digits.map(DigitSlot::new),
            unsealed: std::array::from_fn(|slot| stamp_digit(field, slot, digits[slot])),
            opening_period,
        }
    }

    pub fn slots(&self) -> &[DigitSlot; SLOT_COUNT] {
        &self.slots
    }

    /// Wall pixels of `slot` not yet written because liquid covers them.
    pub fn unsealed(&self, slot: usize) -> &[(usize, usize)] {
        &self.unsealed[slot]
    }

    /// Frames a drain stays open when installing `digit`.
    fn countdown_for(&self, digit: u8) -> u32 {
        (self.opening_period as i32 + DIGIT_EXTENSION[digit as usize]).max(1) as u32
    }

    /// Advance one frame: finish walls left open by liquid, tick running
    /// drains, then open drains for slots whose digit no longer matches the
    /// time.
    ///
    /// The frame that opens a drain does not count down, so a slot resealing
    /// digit `d` is idle again after exactly `countdown_for(d)` further frames.
    pub fn update(&mut self, field: &mut Field, now: NaiveTime) {
        for (slot, unsealed) in self.slots.iter().zip(&mut self.unsealed) {
            if !slot.is_draining() && !unsealed.is_empty() {
                seal(field, unsealed);
            }
        }

        let intended = intended_digits(now);
        let changed: [bool; SLOT_COUNT] =
            std::array::from_fn(|slot| self.slots[slot].target() != intended[slot]);

        for slot in 0..SLOT_COUNT {
            if !changed[slot] {
                self.tick(field, slot);
            }
        }

        for pair in PAIRS {
            let coupled = pair.iter().all(|&slot| changed[slot]);
            let shared = pair
                .iter()
                .map(|&slot| self.countdown_for(intended[slot]))
                .max()
                .unwrap_or(self.opening_period);
            for slot in pair {
                if !changed[slot] {
                    continue;
                }
                let remaining = if coupled {
                    shared
                } else {
                    self.countdown_for(intended[slot])
                };
                self.begin_drain(field, slot, intended[slot], remaining);
            }
        }
    }

    fn begin_drain(&mut self, field: &mut Field, slot: usize, pending: u8, remaining: u32) {
        debug!(
            "slot {slot}: draining {} -> {pending} for {remaining} frames",
            self.slots[slot].current
        );
        open_drain(field, slot);
        self.unsealed[slot].clear();
        self.slots[slot].phase = SlotPhase::Draining { remaining, pending };
    }

    fn tick(&mut self, field: &mut Field, slot: usize) {
        let SlotPhase::Draining { remaining, pending } = self.slots[slot].phase else {
            return;
        };
        if remaining > 1 {
            self.slots[slot].phase = SlotPhase::Draining {
                remaining: remaining - 1,
                pending,
            };
            return;
        }
        self.unsealed[slot] = close_drain(field, slot, pending);
        self.slots[slot] = DigitSlot::new(pending);
        debug!(
            "slot {slot}: resealed with {pending}, {} pixels under liquid",
            self.unsealed[slot].len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waterclock_core::{Cell, HEIGHT, Species};
    use waterclock_glyphs::drain_columns;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn drain_is_open(field: &Field, slot: usize) -> bool {
        drain_columns(slot)
            .iter()
            .all(|&x| field.get(x, HEIGHT - 1).is_background())
    }

    fn drain_is_sealed(field: &Field, slot: usize) -> bool {
        drain_columns(slot)
            .iter()
            .all(|&x| (HEIGHT - 3..HEIGHT).all(|y| field.get(x, y).is_wall()))
    }

    #[test]
    fn test_intended_digits() {
        assert_eq!(intended_digits(at(23, 59)), [2, 3, 5, 9]);
        assert_eq!(intended_digits(at(7, 5)), [0, 7, 0, 5]);
    }

    #[test]
    fn test_starts_idle() {
        let mut field = Field::terrain();
        let drains = DrainController::new(&mut field, at(12, 34), 30);
        let digits: Vec<u8> = drains.slots().iter().map(DigitSlot::current).collect();
        assert_eq!(digits, vec![1, 2, 3, 4]);
        assert!(drains.slots().iter().all(|s| s.drain_countdown() == -1));
        assert!((0..SLOT_COUNT).all(|slot| !drain_is_open(&field, slot)));
    }

    #[test]
    fn test_drain_round_trip() {
        let mut field = Field::terrain();
        let mut drains = DrainController::new(&mut field, at(12, 34), 30);

        drains.update(&mut field, at(12, 35));
        let expected = (30 + DIGIT_EXTENSION[5]) as u32;
        assert_eq!(
            drains.slots()[3].phase(),
            SlotPhase::Draining {
                remaining: expected,
                pending: 5
            }
        );
        assert_eq!(drains.slots()[3].current(), 4);
        assert!(drain_is_open(&field, 3));
        assert!(!drains.slots()[2].is_draining());

        for _ in 0..expected - 1 {
            drains.update(&mut field, at(12, 35));
        }
        assert_eq!(drains.slots()[3].drain_countdown(), 1);

        drains.update(&mut field, at(12, 35));
        assert_eq!(drains.slots()[3].current(), 5);
        assert_eq!(drains.slots()[3].drain_countdown(), -1);
        assert!(!drain_is_open(&field, 3));
    }

    #[test]
    fn test_short_extension_still_counts_down() {
        let mut field = Field::terrain();
        let mut drains = DrainController::new(&mut field, at(12, 30), 3);
        drains.update(&mut field, at(12, 31));
        assert_eq!(drains.slots()[3].drain_countdown(), 1);
        drains.update(&mut field, at(12, 31));
        assert_eq!(drains.slots()[3].current(), 1);
    }

    #[test]
    fn test_pair_drains_together() {
        let mut field = Field::terrain();
        let mut drains = DrainController::new(&mut field, at(10, 49), 30);
        drains.update(&mut field, at(10, 50));

        let tens = drains.slots()[2];
        let units = drains.slots()[3];
        assert!(tens.is_draining() && units.is_draining());
        let shared = 30 + DIGIT_EXTENSION[5].max(DIGIT_EXTENSION[0]);
        assert_eq!(tens.drain_countdown(), shared);
        assert_eq!(units.drain_countdown(), shared);
        assert!(!drains.slots()[0].is_draining());

        for _ in 0..shared {
            drains.update(&mut field, at(10, 50));
        }
        assert_eq!(drains.slots()[2].current(), 5);
        assert_eq!(drains.slots()[3].current(), 0);
        assert!(drains.slots().iter().all(|s| !s.is_draining()));
    }

    #[test]
    fn test_change_while_draining_restarts() {
        let mut field = Field::terrain();
        let mut drains = DrainController::new(&mut field, at(12, 34), 30);
        drains.update(&mut field, at(12, 35));
        for _ in 0..10 {
            drains.update(&mut field, at(12, 35));
        }
        drains.update(&mut field, at(12, 36));
        assert_eq!(
            drains.slots()[3].phase(),
            SlotPhase::Draining {
                remaining: (30 + DIGIT_EXTENSION[6]) as u32,
                pending: 6
            }
        );
        assert_eq!(drains.slots()[3].current(), 4);
    }

    #[test]
    fn test_reseal_waits_for_liquid_in_drain_holes() {
        let mut field = Field::terrain();
        let mut drains = DrainController::new(&mut field, at(12, 34), 3);
        drains.update(&mut field, at(12, 35));
        assert!(drain_is_open(&field, 3));

        let [left, right] = drain_columns(3);
        for y in HEIGHT - 3..HEIGHT {
            field.set(left, y, Cell::Liquid(Species::Azure));
        }
        while drains.slots()[3].is_draining() {
            drains.update(&mut field, at(12, 35));
        }
        assert_eq!(drains.unsealed(3).len(), 3);
        assert!(field.get(right, HEIGHT - 1).is_wall());
        assert!(field.get(left, HEIGHT - 1).is_liquid());

        drains.update(&mut field, at(12, 35));
        assert_eq!(drains.unsealed(3).len(), 3);

        for y in HEIGHT - 3..HEIGHT {
            field.set(left, y, Cell::Background);
        }
        drains.update(&mut field, at(12, 35));
        assert!(drains.unsealed(3).is_empty());
        assert!(drain_is_sealed(&field, 3));
    }

    #[test]
    fn test_new_drain_drops_unfinished_walls() {
        let mut field = Field::terrain();
        let mut drains = DrainController::new(&mut field, at(12, 34), 3);
        drains.update(&mut field, at(12, 35));
        let [left, _] = drain_columns(3);
        field.set(left, HEIGHT - 1, Cell::Liquid(Species::Pale));
        while drains.slots()[3].is_draining() {
            drains.update(&mut field, at(12, 35));
        }
        assert_eq!(drains.unsealed(3), &[(left, HEIGHT - 1)]);

        drains.update(&mut field, at(12, 36));
        assert!(drains.slots()[3].is_draining());
        assert!(drains.unsealed(3).is_empty());
    }
}
