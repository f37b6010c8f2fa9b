//! Rage Tiles - a "don't tap the red tile" reaction minigame core
//!
//! Core modules:
//! - `sim`: Deterministic game logic (phase table, placement, evasion, round state)
//! - `rng`: Blended daily-deterministic / ambient random source
//! - `bestscore`: Persisted best-score cell
//! - `settings`: Sound/vibration preferences
//! - `ui`: Presentation-side helpers (view flags, meters, copy, share text)
//!
//! Rendering, audio synthesis, vibration and clipboard access live outside this
//! crate; the sim emits [`sim::GameEvent`]s and the `ui` module turns state into
//! plain values a front end can draw.

pub mod bestscore;
pub mod rng;
pub mod settings;
pub mod sim;
pub mod ui;

pub use bestscore::BestScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of tiles in the arena
    pub const TILE_COUNT: usize = 22;
    /// Padding kept between tiles and the arena edge (px)
    pub const EDGE_PAD: f32 = 10.0;

    /// Fallback tile size before the front end has measured one (px)
    pub const DEFAULT_TILE_W: f32 = 88.0;
    pub const DEFAULT_TILE_H: f32 = 64.0;

    /// A pointer sample older than this no longer counts as "recent"
    pub const POINTER_FRESH_MS: f64 = 900.0;
    /// A tap sample older than this no longer counts as "recent"
    pub const TAP_FRESH_MS: f64 = 700.0;
    /// Blackouts require even fresher input than hunting does
    pub const BLACKOUT_FRESH_MS: f64 = 650.0;

    /// Duration of the near-miss flash on the dangerous tile
    pub const NEAR_MISS_FLASH_MS: f64 = 420.0;

    /// Minimum tile separation during layout, as a fraction of tile size
    pub const MIN_SEPARATION_FRAC: f32 = 0.68;
    /// Redraw attempts per tile before accepting an overlapping candidate
    pub const LAYOUT_RETRIES: u32 = 45;
    /// Draw attempts when picking decoy tiles without replacement
    pub const DECOY_PICK_TRIES: u32 = 70;

    /// Scores at which interval timers are torn down and rearmed
    pub const PHASE_MILESTONES: [u32; 4] = [4, 8, 12, 16];
}

/// Clamp a value to `[lo, hi]`
#[inline]
pub fn clamp_f64(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// One-time wasm setup: panic hook + console logger
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
