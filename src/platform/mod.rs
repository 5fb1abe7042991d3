//! Platform layer between the simulation and a presentation front end
//!
//! Handles:
//! - Frame pacing against a monotonic clock
//! - Held-key state and one-shot commands, folded into `TickInput`

pub mod input;
pub mod time;

pub use input::{InputState, Key};
pub use time::FramePacer;
