//! Pixel digit glyphs for the waterclock, and the renderer that carves them
//! into the wall layer of a [`Field`].
//!
//! A glyph's strokes are the channels liquid flows through; everything else in
//! the slot is wall. Every slot rests on a solid floor that the drain punches
//! through while a digit is being replaced.

use waterclock_core::{Cell, Field, SLOT_COUNT, ZOOM};

/// Glyph width in units.
pub const GLYPH_COLUMNS: usize = 3;

/// Glyph height in units.
pub const GLYPH_ROWS: usize = 5;

/// Digit strokes (3 units wide, 5 units tall). `█` marks an open channel.
pub const DIGITS: [[&str; GLYPH_ROWS]; 10] = [
    // 0
    ["███", "█ █", "█ █", "█ █", "███"],
    // 1
    ["  █", "  █", "  █", "  █", "  █"],
    // 2
    ["███", "  █", "███", "█  ", "███"],
    // 3
    ["███", "  █", "███", "  █", "███"],
    // 4
    ["█ █", "█ █", "███", "  █", "  █"],
    // 5
    ["███", "█  ", "███", "  █", "███"],
    // 6
    ["███", "█  ", "███", "█ █", "███"],
    // 7
    ["███", "█ █", "  █", "  █", "  █"],
    // 8
    ["███", "█ █", "███", "█ █", "███"],
    // 9
    ["███", "█ █", "███", "  █", "███"],
];

/// A sealed slot with no channels at all.
pub const COVER: [&str; GLYPH_ROWS] = ["   ", "   ", "   ", "   ", "   "];

/// Unit row of the slot floor.
const FLOOR_UNIT_ROW: usize = 1 + GLYPH_ROWS;

/// Horizontal position of the colon cells.
pub const COLON_X: usize = 2 * 4 * ZOOM + ZOOM / 2;

/// Vertical positions of the two colon cells.
pub const COLON_ROWS: [usize; 2] = [2 * ZOOM + ZOOM / 2, 4 * ZOOM + ZOOM / 2];

const COLON_PERIOD: u32 = 6;
const COLON_PHASE_SHIFT: u32 = 5;

/// A 3×5 wall bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    wall: [[bool; GLYPH_COLUMNS]; GLYPH_ROWS],
}

impl Glyph {
    /// Glyph for a decimal digit.
    ///
    /// # Panics
    /// If `digit` is not in `0..=9`.
    pub fn digit(digit: u8) -> Self {
        assert!(digit <= 9, "no glyph for digit {digit}");
        Self::from_art(&DIGITS[digit as usize])
    }

    /// The fully sealed cover glyph.
    pub fn cover() -> Self {
        Self::from_art(&COVER)
    }

    fn from_art(art: &[&str; GLYPH_ROWS]) -> Self {
        let mut wall = [[true; GLYPH_COLUMNS]; GLYPH_ROWS];
        for (row, line) in art.iter().enumerate() {
            for (col, ch) in line.chars().take(GLYPH_COLUMNS).enumerate() {
                wall[row][col] = ch == ' ';
            }
        }
        Self { wall }
    }

    /// `true` where the glyph is wall.
    pub fn is_wall(&self, col: usize, row: usize) -> bool {
        self.wall[row][col]
    }
}

/// Left-most cell column of a glyph unit inside a slot.
fn unit_left(slot: usize, unit: usize) -> usize {
    (1 + slot * 4 + unit) * ZOOM
}

/// The two floor columns opened by a drain.
pub fn drain_columns(slot: usize) -> [usize; 2] {
    [unit_left(slot, 0) + 1, unit_left(slot, 2) + 1]
}

fn floor_rows() -> std::ops::Range<usize> {
    FLOOR_UNIT_ROW * ZOOM..(FLOOR_UNIT_ROW + 1) * ZOOM
}

fn slot_columns(slot: usize) -> std::ops::Range<usize> {
    unit_left(slot, 0)..unit_left(slot, GLYPH_COLUMNS)
}

/// Write wall unless the cell holds liquid. Returns whether the wall went in.
fn put_wall(field: &mut Field, x: usize, y: usize) -> bool {
    if field.get(x, y).is_liquid() {
        return false;
    }
    field.set(x, y, Cell::Wall);
    true
}

/// Write the wall pixels in `unsealed`, keeping those that cannot go in yet.
///
/// A pixel under liquid waits. So does a pixel directly below one that
/// waits, so liquid caught inside new wall can still fall out through the
/// bottom instead of being walled in.
pub fn seal(field: &mut Field, unsealed: &mut Vec<(usize, usize)>) {
    unsealed.sort_unstable();
    let mut waiting: Option<(usize, usize)> = None;
    unsealed.retain(|&(x, y)| {
        let held = y > 0 && waiting == Some((x, y - 1));
        if !held && put_wall(field, x, y) {
            return false;
        }
        waiting = Some((x, y));
        true
    });
}

/// Carve `glyph` into slot `slot`, replacing whatever glyph was there.
///
/// Old wall in the slot block is cleared, the floor is made solid and the
/// glyph's wall pixels are written scaled by [`ZOOM`]. Liquid is never
/// overwritten: the pixels it covers are returned so they can be finished
/// with [`seal`] once the liquid has moved on.
pub fn stamp_glyph(field: &mut Field, slot: usize, glyph: &Glyph) -> Vec<(usize, usize)> {
    assert!(slot < SLOT_COUNT, "no slot {slot}");
    let mut pixels: Vec<(usize, usize)> = floor_rows()
        .flat_map(|y| slot_columns(slot).map(move |x| (x, y)))
        .collect();

    for y in 0..FLOOR_UNIT_ROW * ZOOM {
        for x in slot_columns(slot) {
            if field.get(x, y).is_wall() {
                field.set(x, y, Cell::Background);
            }
        }
    }

    for row in 0..GLYPH_ROWS {
        for col in 0..GLYPH_COLUMNS {
            if !glyph.is_wall(col, row) {
                continue;
            }
            for y in (1 + row) * ZOOM..(2 + row) * ZOOM {
                pixels.extend((unit_left(slot, col)..unit_left(slot, col + 1)).map(|x| (x, y)));
            }
        }
    }
    seal(field, &mut pixels);
    pixels
}

/// Carve digit `digit` into slot `slot`. See [`stamp_glyph`].
pub fn stamp_digit(field: &mut Field, slot: usize, digit: u8) -> Vec<(usize, usize)> {
    stamp_glyph(field, slot, &Glyph::digit(digit))
}

/// Punch the drain holes through the slot floor.
pub fn open_drain(field: &mut Field, slot: usize) {
    assert!(slot < SLOT_COUNT, "no slot {slot}");
    for y in floor_rows() {
        for x in drain_columns(slot) {
            if field.get(x, y).is_wall() {
                field.set(x, y, Cell::Background);
            }
        }
    }
}

/// Seal the drain holes and carve the new digit. Returns the pixels still
/// covered by liquid, drain holes included.
pub fn close_drain(field: &mut Field, slot: usize, digit: u8) -> Vec<(usize, usize)> {
    stamp_digit(field, slot, digit)
}

/// Whether the colon is open (background) at the given second of the minute.
pub fn colon_open(second: u32) -> bool {
    (second + COLON_PHASE_SHIFT) % COLON_PERIOD < COLON_PERIOD / 2
}

/// Open or close the colon cells for the given second. Liquid is left alone.
pub fn update_colon(field: &mut Field, second: u32) {
    let open = colon_open(second);
    for y in COLON_ROWS {
        match field.get(COLON_X, y) {
            Cell::Wall if open => field.set(COLON_X, y, Cell::Background),
            Cell::Background if !open => field.set(COLON_X, y, Cell::Wall),
            _ => {}
        }
    }
}
