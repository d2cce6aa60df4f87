//! Colour clustering.
//!
//! Each scheduled droplet looks at same-species droplets around it and trades
//! places with a differently coloured neighbour on the side they pull from, as
//! long as that does not leave it with fewer same-species neighbours. Over
//! time the colours separate into patches without the liquid ever merging.

use std::cmp::Ordering;

use rand::Rng;
use waterclock_core::{Cell, Field, HEIGHT, Species, WIDTH};

use super::{Moved, Schedule};

/// Half-width of the neighbourhood window.
const REACH: isize = 2;

/// Neighbours further than this (Manhattan) are ignored.
const MAX_DISTANCE: isize = 3;

pub(crate) fn cluster<R: Rng + ?Sized>(
    field: &mut Field,
    moved: &mut Moved,
    schedule: Schedule,
    prefer_x: bool,
    rare_rise_veto: f64,
    rng: &mut R,
) {
    for y in 0..HEIGHT {
        for x in 1..WIDTH - 1 {
            if !schedule.selects(x, y) || moved.contains(x, y) {
                continue;
            }
            let Some(species) = field.get(x, y).species() else {
                continue;
            };

            let (wx, wy) = pull(field, x, y, species);
            let horizontal_first = match wx.abs().cmp(&wy.abs()) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => prefer_x,
            };
            let steps = if horizontal_first {
                [(wx.signum(), 0), (0, wy.signum())]
            } else {
                [(0, wy.signum()), (wx.signum(), 0)]
            };

            for step in steps {
                if step == (0, 0) {
                    continue;
                }
                if try_swap(field, moved, (x, y), step, rare_rise_veto, rng) {
                    break;
                }
            }
        }
    }
}

/// Sum of offsets towards same-species droplets in the window around `(x, y)`.
fn pull(field: &Field, x: usize, y: usize, species: Species) -> (isize, isize) {
    let (mut wx, mut wy) = (0, 0);
    for dy in -REACH..=REACH {
        for dx in -REACH..=REACH {
            let distance = dx.abs() + dy.abs();
            if !(1..=MAX_DISTANCE).contains(&distance) {
                continue;
            }
            if field.cell(x as isize + dx, y as isize + dy) == Some(Cell::Liquid(species)) {
                wx += dx;
                wy += dy;
            }
        }
    }
    (wx, wy)
}

/// Orthogonal neighbours of `(x, y)` holding `species`, not counting `skip`.
fn same_neighbours(
    field: &Field,
    x: usize,
    y: usize,
    species: Species,
    skip: (usize, usize),
) -> usize {
    [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .map(|(dx, dy)| (x as isize + dx, y as isize + dy))
        .filter(|&(nx, ny)| (nx, ny) != (skip.0 as isize, skip.1 as isize))
        .filter(|&(nx, ny)| field.cell(nx, ny) == Some(Cell::Liquid(species)))
        .count()
}

fn try_swap<R: Rng + ?Sized>(
    field: &mut Field,
    moved: &mut Moved,
    (x, y): (usize, usize),
    (dx, dy): (isize, isize),
    rare_rise_veto: f64,
    rng: &mut R,
) -> bool {
    let (tx, ty) = (x as isize + dx, y as isize + dy);
    let Some(Cell::Liquid(other)) = field.cell(tx, ty) else {
        return false;
    };
    let species = field.get(x, y).species();
    let Some(species) = species.filter(|&s| s != other) else {
        return false;
    };
    let (tx, ty) = (tx as usize, ty as usize);
    if moved.contains(tx, ty) {
        return false;
    }

    let before = same_neighbours(field, x, y, species, (tx, ty));
    let after = same_neighbours(field, tx, ty, species, (x, y));
    if after < before {
        return false;
    }

    let heavy_rises = (dy < 0 && species.is_heavy() && !other.is_heavy())
        || (dy > 0 && other.is_heavy() && !species.is_heavy());
    if heavy_rises && rng.gen_bool(rare_rise_veto) {
        return false;
    }

    field.swap((x, y), (tx, ty));
    moved.mark(x, y);
    moved.mark(tx, ty);
    true
}
