//! Gravity.

use rand::Rng;
use waterclock_core::{Cell, Field, HEIGHT, WIDTH};

use super::Moved;

/// Let every droplet fall one cell, scanning bottom-up so nothing falls twice.
///
/// A droplet resting on another tries one diagonal, picked at random. If the
/// cell beside it on that side is not wall and the other diagonal is open as
/// well, the two droplets splash apart into both diagonals, which keeps stacks
/// from standing as single-cell columns.
pub(crate) fn fall<R: Rng + ?Sized>(field: &mut Field, moved: &mut Moved, rng: &mut R) {
    for y in (0..HEIGHT).rev() {
        for x in 1..WIDTH - 1 {
            let Some(species) = field.get(x, y).species() else {
                continue;
            };

            let below = field.get(x, y + 1);
            if below.is_background() {
                if field.move_liquid((x, y), (x, y + 1)) {
                    moved.mark(x, y + 1);
                }
                continue;
            }
            let Some(below_species) = below.species() else {
                continue;
            };

            let (side, other) = if rng.gen_bool(0.5) {
                (x + 1, x - 1)
            } else {
                (x - 1, x + 1)
            };
            if !field.get(side, y + 1).is_background() {
                continue;
            }

            let splash = !field.get(side, y).is_wall()
                && field.get(other, y + 1).is_background()
                && !moved.contains(x, y + 1);
            if splash {
                let (first, second) = if rng.gen_bool(0.5) {
                    (species, below_species)
                } else {
                    (below_species, species)
                };
                field.set(x, y, Cell::Background);
                field.set(x, y + 1, Cell::Background);
                if field.place_liquid(side, y + 1, first) {
                    moved.mark(side, y + 1);
                }
                if field.place_liquid(other, y + 1, second) {
                    moved.mark(other, y + 1);
                }
            } else if field.move_liquid((x, y), (side, y + 1)) {
                moved.mark(side, y + 1);
            }
        }
    }
}
