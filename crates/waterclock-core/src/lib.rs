//! Core types shared by the waterclock crates.
//!
//! The [`Field`] is the grid every other crate reads and writes: a fixed-size
//! array of [`Cell`]s holding background, wall or liquid. Geometry constants
//! live in [`field`], engine tunables in [`EngineConfig`].

mod cell;
mod config;
mod edit;
pub mod field;

pub use cell::{Cell, Species};
pub use config::EngineConfig;
pub use edit::{Direction, Edit, EditAction};
pub use field::{DRAIN_ROW, Field, HEIGHT, ROWS, SLOT_COUNT, WIDTH, ZOOM};
