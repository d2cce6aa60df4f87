//! Liquid automaton for the waterclock.
//!
//! [`Engine`] owns the field and advances it one frame per
//! [`Engine::update`]: digit slots drain and reseal as the time changes, the
//! colon blinks, and droplets fall, spread, cluster by colour and drip in from
//! the top. Everything random goes through one seeded generator so runs are
//! reproducible.

mod color;
mod drain;
mod history;
mod motion;
mod pick;
mod state;

pub use color::{Family, pick_species};
pub use drain::{DIGIT_EXTENSION, DigitSlot, DrainController, SlotPhase, intended_digits};
pub use history::{FieldHistory, HISTORY_DEPTH};
pub use motion::LiquidMotion;
pub use pick::PickQueue;
pub use state::Engine;
