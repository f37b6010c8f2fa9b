//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay pure and testable:
//! - Timestamps and input come in as plain values
//! - Randomness comes from the injectable [`crate::rng::BlendedRng`]
//! - Effects go out as [`GameEvent`]s; no rendering or platform dependencies

pub mod evasion;
pub mod phase;
pub mod placement;
pub mod state;
pub mod tick;

pub use evasion::MoveReason;
pub use phase::{PhaseConfig, phase_for};
pub use placement::{Arena, layout_all, near_position, random_position};
pub use state::{
    GameEvent, LossReason, PointerSample, RoundPhase, RoundState, Scheduler, TaskKind, Tile,
};
pub use tick::{advance, pointer_moved, reset_best, resized, start, tap};
