//! User edits applied on top of the automaton step.

/// One of the four grid directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset `(dx, dy)`, with `y` growing downwards.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What an edit does to its target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Turn the cell into wall.
    SetWall,
    /// Clear the cell to background.
    SetBackground,
    /// Push a droplet one step in the given direction.
    Drag(Direction),
}

/// A single-cell edit. Coordinates outside the visible field are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub x: isize,
    pub y: isize,
    pub action: EditAction,
}

impl Edit {
    pub fn new(x: isize, y: isize, action: EditAction) -> Self {
        Self { x, y, action }
    }
}
