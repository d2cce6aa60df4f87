//! Which species of droplet to inject.

use chrono::{NaiveTime, Timelike};
use waterclock_core::Species;

/// One accent droplet per this many frames.
pub const ACCENT_PERIOD: u64 = 1008;

/// Frame offset of the accent within [`ACCENT_PERIOD`].
pub const ACCENT_OFFSET: u64 = 0;

/// Period of the secondary-shade cycle.
pub const SHADE_PERIOD: u64 = 196;

/// Frames at or past this point of [`SHADE_PERIOD`] use the secondary shade.
pub const SHADE_THRESHOLD: u64 = 168;

/// Colour family, chosen by hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Day,
    Night,
}

impl Family {
    /// Night runs from 19:00 to 05:59.
    pub fn at(now: NaiveTime) -> Self {
        match now.hour() {
            6..=18 => Family::Day,
            _ => Family::Night,
        }
    }

    pub fn primary(self) -> Species {
        match self {
            Family::Day => Species::Azure,
            Family::Night => Species::Indigo,
        }
    }

    pub fn secondary(self) -> Species {
        match self {
            Family::Day => Species::Pale,
            Family::Night => Species::Mist,
        }
    }
}

/// Species for a droplet injected at `frame`, given the time of day.
pub fn pick_species(frame: u64, now: NaiveTime) -> Species {
    let family = Family::at(now);
    if frame % ACCENT_PERIOD == ACCENT_OFFSET {
        Species::Coral
    } else if frame % SHADE_PERIOD >= SHADE_THRESHOLD {
        family.secondary()
    } else {
        family.primary()
    }
}
