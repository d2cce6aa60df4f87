//! Per-frame liquid motion.
//!
//! One step runs, in order: edge drainage, gravity fall, lateral migration,
//! clustering swap and injection. A droplet moves at most once per step:
//! whatever a later phase finds marked in the [`Moved`] mask is left alone.

mod cluster;
mod fall;
mod migrate;

use chrono::NaiveTime;
use log::trace;
use rand::Rng;
use waterclock_core::{Cell, DRAIN_ROW, EngineConfig, Field, HEIGHT, ROWS, WIDTH, ZOOM};

use crate::color::pick_species;
use crate::pick::PickQueue;

/// Cells that already moved during the current step.
#[derive(Debug)]
pub(crate) struct Moved {
    cells: Vec<bool>,
}

impl Moved {
    pub(crate) fn new() -> Self {
        Self {
            cells: vec![false; WIDTH * ROWS],
        }
    }

    pub(crate) fn mark(&mut self, x: usize, y: usize) {
        self.cells[y * WIDTH + x] = true;
    }

    pub(crate) fn contains(&self, x: usize, y: usize) -> bool {
        self.cells[y * WIDTH + x]
    }
}

/// A pick-queue draw: cells with `(x + y) % period == pick` are eligible.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Schedule {
    pub period: usize,
    pub pick: usize,
}

impl Schedule {
    pub(crate) fn selects(self, x: usize, y: usize) -> bool {
        (x + y) % self.period == self.pick
    }
}

/// Remove liquid from the edge columns and the drain row.
pub(crate) fn drain_edges(field: &mut Field) {
    for y in 0..HEIGHT {
        for x in [0, WIDTH - 1] {
            if field.get(x, y).is_liquid() {
                field.set(x, y, Cell::Background);
            }
        }
    }
    for x in 0..WIDTH {
        if field.get(x, DRAIN_ROW).is_liquid() {
            field.set(x, DRAIN_ROW, Cell::Background);
        }
    }
}

/// Liquid motion state: the two schedules and the current drop column.
#[derive(Debug, Clone)]
pub struct LiquidMotion {
    move_picks: PickQueue,
    cluster_picks: PickQueue,
    drop_interval: u64,
    drop_size: u64,
    rare_rise_veto: f64,
    /// Column of the current injection window, chosen when it opens.
    drop_column: Option<usize>,
}

impl LiquidMotion {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            move_picks: PickQueue::new(config.move_period, config.pick_multiplicity),
            cluster_picks: PickQueue::new(config.cluster_period, config.pick_multiplicity),
            drop_interval: config.drop_interval.max(1),
            drop_size: config.drop_size,
            rare_rise_veto: config.rare_rise_veto.clamp(0.0, 1.0),
            drop_column: None,
        }
    }

    /// Advance the liquid by one frame.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        field: &mut Field,
        frame: u64,
        now: NaiveTime,
        rng: &mut R,
    ) {
        drain_edges(field);

        let mut moved = Moved::new();
        fall::fall(field, &mut moved, rng);

        let migration = Schedule {
            period: self.move_picks.period(),
            pick: self.move_picks.next(rng),
        };
        migrate::migrate(field, &mut moved, migration);

        let clustering = Schedule {
            period: self.cluster_picks.period(),
            pick: self.cluster_picks.next(rng),
        };
        let prefer_x = rng.gen_bool(0.5);
        cluster::cluster(
            field,
            &mut moved,
            clustering,
            prefer_x,
            self.rare_rise_veto,
            rng,
        );

        self.inject(field, frame, now, rng);
    }

    /// Drip new droplets in at the top during the first frames of each window.
    fn inject<R: Rng + ?Sized>(
        &mut self,
        field: &mut Field,
        frame: u64,
        now: NaiveTime,
        rng: &mut R,
    ) {
        let t = frame % self.drop_interval;
        if t >= self.drop_size {
            return;
        }
        let column = match self.drop_column {
            Some(column) if t != 0 => column,
            _ => {
                let column = WIDTH - 2 - rng.gen_range(0..4 * ZOOM);
                trace!("frame {frame}: dropping at column {column}");
                self.drop_column = Some(column);
                column
            }
        };
        if field.get(column, 0).is_background() {
            field.set(column, 0, Cell::Liquid(pick_species(frame, now)));
        }
    }
}
