//! Platform abstraction layer
//!
//! Handles the parts of a frame that come from the host:
//! - Time/ticks (`time`)
//! - Keyboard state to input axes (`input`)

pub mod input;
pub mod time;

pub use input::{Key, KeyboardState};
pub use time::FrameClock;
