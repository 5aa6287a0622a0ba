//! Pong core game engine - deterministic single-player pong against a
//! computer-controlled paddle.
//!
//! [`TickDriver`] is the entry point for frontends: feed it key state and
//! elapsed time, read back a [`View`] to draw.

pub mod ai;
pub mod consts;
pub mod driver;
pub mod game;
pub mod input;
pub mod physics;
pub mod types;

pub use ai::{Controller, Tracker};
pub use driver::TickDriver;
pub use game::Game;
pub use input::{Key, KeyState};
pub use physics::Physics;
pub use types::*;
