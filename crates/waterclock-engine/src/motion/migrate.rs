//! Sideways spreading.

use waterclock_core::{Field, HEIGHT, WIDTH};

use super::{Moved, Schedule};

/// Push scheduled droplets one cell away from an occupied neighbour into an
/// open one, so pools level out instead of piling up.
pub(crate) fn migrate(field: &mut Field, moved: &mut Moved, schedule: Schedule) {
    for y in 0..HEIGHT {
        for x in 1..WIDTH - 1 {
            if !schedule.selects(x, y) || moved.contains(x, y) || !field.get(x, y).is_liquid() {
                continue;
            }
            let left = field.get(x - 1, y);
            let right = field.get(x + 1, y);
            let target = if left.is_occupied() && right.is_background() {
                x + 1
            } else if right.is_occupied() && left.is_background() {
                x - 1
            } else {
                continue;
            };
            if field.move_liquid((x, y), (target, y)) {
                moved.mark(target, y);
            }
        }
    }
}
