//! Evasion controller
//!
//! Decides how the dangerous tile dodges the player: fair random relocation,
//! or a hunt biased toward recent pointer/tap input, plus the misdirection
//! layer (near-miss flashes, decoy tiles, blackouts) and the delayed
//! post-tap tricks.
//!
//! Every yes/no roll blends the daily channel with the ambient one at a
//! fixed per-site weight; the weights are tuning constants, not guarantees.

use crate::consts::{BLACKOUT_FRESH_MS, DECOY_PICK_TRIES, NEAR_MISS_FLASH_MS};

use super::phase::PhaseConfig;
use super::placement::{near_position, random_position};
use super::state::{GameEvent, RoundState, TaskKind};

/// Daily-channel share of each decision roll
const HUNT_BLEND: f32 = 0.60;
const NEAR_MISS_BLEND: f32 = 0.70;
const DECOY_BLEND: f32 = 0.70;
const BLACKOUT_BLEND: f32 = 0.65;
const AFTER_TAP_BLEND: f32 = 0.60;
const TAP_CHASE_BLEND: f32 = 0.50;

/// Pointer anchor's share when a fresh tap blends into the hunt target
const POINTER_ANCHOR_WEIGHT: f32 = 0.55;

/// After a safe tap at phase >= 3, chance of an immediate chase reposition
const TAP_CHASE_PROBABILITY: f32 = 0.36;
/// Post-tap delayed reposition: phase >= 3, roll threshold and delay window
const AFTER_TAP_REPOSITION_PROBABILITY: f32 = 0.26;
/// Post-tap delayed swap: phase >= 4, roll threshold and delay window
const AFTER_TAP_SWAP_PROBABILITY: f32 = 0.20;

/// What prompted a danger reposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReason {
    /// First placement of the round; never flashes a near miss
    Init,
    /// Periodic all-tiles shuffle
    MoveAll,
    /// Danger identity just transferred
    Swap,
    /// High-phase extra cadence
    Micro,
    /// Delayed post-tap trick
    AfterTap,
    /// Immediate post-tap chase
    TapChase,
    /// Arena was re-measured
    Resize,
}

/// Relocate the dangerous tile: fair placement, or a hunt toward the
/// player's recent input. No-op when not playing or the arena is unmeasured.
pub fn reposition_danger(state: &mut RoundState, cfg: &PhaseConfig, reason: MoveReason, now_ms: f64) {
    if !state.is_playing() || !state.arena.is_measured() {
        return;
    }
    if state.danger_index >= state.tiles.len() {
        return;
    }

    let pointer = state.fresh_pointer(now_ms);
    let tap = state.fresh_tap(now_ms);
    let danger = state.danger_index;

    let hunting = pointer.is_some() && state.rng.blend(HUNT_BLEND) < cfg.hunt_probability;
    let Some(p) = pointer.filter(|_| hunting) else {
        // Intentionally fair placement when not hunting; no near miss, the
        // tile did not pass close to anyone on purpose
        state.tiles[danger].pos = random_position(&state.arena, &mut state.rng);
        return;
    };

    let anchor =
        near_position(&state.arena, p.pos, cfg.safe_radius, cfg.hunt_radius, &mut state.rng);
    // Dual-anchor blend: lean toward where the player is about to tap, not
    // just where the cursor rests
    let pos = if let Some(t) = tap {
        let second =
            near_position(&state.arena, t.pos, cfg.safe_radius, cfg.hunt_radius, &mut state.rng);
        (anchor * POINTER_ANCHOR_WEIGHT + second * (1.0 - POINTER_ANCHOR_WEIGHT)).round()
    } else {
        anchor
    };
    state.tiles[danger].pos = pos;

    // Near-miss flash on the hunt: feedback only, never changes the outcome
    if reason != MoveReason::Init
        && state.rng.blend(NEAR_MISS_BLEND) < cfg.near_miss_probability
    {
        state.near_miss_until_ms = now_ms + NEAR_MISS_FLASH_MS;
        state.emit(GameEvent::NearMiss { tile: danger });
        if cfg.phase >= 3 {
            state.emit(GameEvent::Vibrate(&[12]));
        }
    }
}

/// Transfer the danger flag to a different tile, then reposition it.
pub fn swap_danger(state: &mut RoundState, cfg: &PhaseConfig, now_ms: f64) {
    if !state.is_playing() || state.tiles.is_empty() {
        return;
    }

    let mut idx = state.rng.daily_index(state.tiles.len());
    if idx == state.danger_index {
        idx = (idx + 1) % state.tiles.len();
    }
    state.danger_index = idx;

    reposition_danger(state, cfg, MoveReason::Swap, now_ms);
}

/// Flag 1-2 non-dangerous tiles as decoys for a short random duration.
/// Tapping a decoy scores normally; this is pure misdirection.
pub fn trigger_decoys(state: &mut RoundState, cfg: &PhaseConfig, now_ms: f64) {
    if !state.is_playing() {
        return;
    }
    if state.rng.blend(DECOY_BLEND) > cfg.decoy_probability {
        return;
    }

    let count = if cfg.phase >= 4 { 2 } else { 1 };
    let mut picks: Vec<usize> = Vec::with_capacity(count);
    let mut tries = 0;
    while picks.len() < count && tries < DECOY_PICK_TRIES {
        tries += 1;
        let idx = state.rng.daily_index(state.tiles.len());
        if idx == state.danger_index || picks.contains(&idx) {
            continue;
        }
        picks.push(idx);
    }

    if picks.is_empty() {
        return;
    }
    let until = now_ms + state.rng.daily_range_i(120, 210) as f64;
    for &idx in &picks {
        state.tiles[idx].decoy_until_ms = until;
    }
    state.emit(GameEvent::Decoy { tiles: picks });
}

/// Blackout flash when the player's input is very fresh. High phases add a
/// shake and a vibration jolt on top.
pub fn maybe_blackout(state: &mut RoundState, cfg: &PhaseConfig, now_ms: f64) {
    if !state.is_playing() || cfg.blackout_probability <= 0.0 {
        return;
    }

    let recent = state
        .pointer
        .map(|p| p.is_fresh(now_ms, BLACKOUT_FRESH_MS))
        .unwrap_or(false)
        || state
            .tap
            .map(|t| t.is_fresh(now_ms, BLACKOUT_FRESH_MS))
            .unwrap_or(false);
    if !recent {
        return;
    }

    if state.rng.blend(BLACKOUT_BLEND) < cfg.blackout_probability {
        let duration = state.rng.daily_range_i(85, 150) as f64;
        state.blackout_until_ms = now_ms + duration;
        state.emit(GameEvent::Blackout { duration_ms: duration });
        if cfg.phase >= 4 {
            state.emit(GameEvent::Shake);
            state.emit(GameEvent::Vibrate(&[20]));
        }
    }
}

/// Post-tap scheduling tricks: stack unpredictability right after the player
/// commits to a tap. Scheduled tasks die with the current epoch, so a
/// milestone rearm or a round end cancels them.
pub fn after_tap_tricks(state: &mut RoundState, cfg: &PhaseConfig, now_ms: f64) {
    if !state.is_playing() {
        return;
    }

    let roll = state.rng.blend(AFTER_TAP_BLEND);

    if cfg.phase >= 3 && roll < AFTER_TAP_REPOSITION_PROBABILITY {
        let delay = state.rng.daily_range_i(55, 110) as f64;
        state
            .scheduler
            .schedule_once(TaskKind::AfterTapReposition, now_ms + delay);
    }
    if cfg.phase >= 4 && roll < AFTER_TAP_SWAP_PROBABILITY {
        let delay = state.rng.daily_range_i(90, 160) as f64;
        state
            .scheduler
            .schedule_once(TaskKind::AfterTapSwap, now_ms + delay);
    }
}

/// Immediate chase after a safe tap in the higher phases.
pub fn tap_chase(state: &mut RoundState, cfg: &PhaseConfig, now_ms: f64) {
    if cfg.phase >= 3 && state.rng.blend(TAP_CHASE_BLEND) < TAP_CHASE_PROBABILITY {
        reposition_danger(state, cfg, MoveReason::TapChase, now_ms);
    }
}
