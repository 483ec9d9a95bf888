//! # Shade
//!
//! Keep to the shadows, grow mushrooms, fill the basket.
//!
//! The game crate builds the behaviour of a round on top of `shade_engine`:
//! entities and their reactions, mushroom planting, the level context that
//! runs the per-frame phases, and the in-game rules (meter, counter, day
//! timer). Rendering, audio and input are left to whoever drives
//! [`InGame::update`] and draws [`InGame::snapshot`].

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod game;
pub mod level;
pub mod mushroom_factory;

pub use config::GameConfig;
pub use error::{GameError, PlacementError};
pub use events::GameEvent;
pub use game::{BodyView, FrameSnapshot, InGame, Meter, Status};
pub use level::{Level, LevelDefinition, StepOutcome};
pub use mushroom_factory::MushroomFactory;
