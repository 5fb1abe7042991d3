//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, run to completion
//! - Randomness only through the match's `GameRng`
//! - Time only through timestamps from a `Clock`
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod gravity;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{Rect, bounce_off_walls, deflect_off_paddle, is_paddle_hit};
pub use gravity::GravityField;
pub use rng::GameRng;
pub use snapshot::{BallView, PaddleView, PowerUpView, Snapshot};
pub use state::{Ball, GameEvent, MatchState, Paddle, Player, PowerUp, PowerUpKind, Score};
pub use tick::{TickInput, activate_invert_controls, activate_multiball, tick};
