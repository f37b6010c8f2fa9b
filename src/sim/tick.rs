//! Round state machine
//!
//! The front end owns a [`RoundState`] and calls into here on input events
//! and on every animation frame. All work is cooperative: nothing blocks,
//! and every timer lives in the state's scheduler so ending or rearming a
//! round cancels the lot before anything else runs.

use glam::Vec2;

use crate::clamp_f64;
use crate::consts::PHASE_MILESTONES;

use super::evasion::{
    MoveReason, after_tap_tricks, maybe_blackout, reposition_danger, swap_danger, tap_chase,
    trigger_decoys,
};
use super::phase::{PhaseConfig, phase_for};
use super::placement::{Arena, layout_all};
use super::state::{GameEvent, LossReason, PointerSample, RoundPhase, RoundState, TaskKind};

/// Heartbeat pacing bounds (ms between beats)
const BEAT_INTERVAL_MAX_MS: f64 = 520.0;
const BEAT_INTERVAL_MIN_MS: f64 = 140.0;

/// Begin a round. Valid from Idle or Ended; a fast-retry tap on the overlay
/// lands here too.
pub fn start(state: &mut RoundState, now_ms: f64) {
    if state.is_playing() {
        return;
    }

    state.score = 0;
    state.phase = RoundPhase::Playing;
    state.near_miss_until_ms = 0.0;
    state.blackout_until_ms = 0.0;
    for tile in state.tiles.iter_mut() {
        tile.decoy_until_ms = 0.0;
    }
    state.emit(GameEvent::Started);

    let cfg = phase_for(0);
    move_all(state, &cfg, now_ms);
    reposition_danger(state, &cfg, MoveReason::Init, now_ms);
    arm_timers(state, &cfg, now_ms);

    log::info!("round started, danger on tile {}", state.danger_index);
}

/// Handle a tap on tile `index` at arena-local `pos`.
pub fn tap(state: &mut RoundState, index: usize, pos: Vec2, now_ms: f64) {
    if !state.is_playing() || index >= state.tiles.len() {
        return;
    }

    state.tap = Some(PointerSample { pos, at_ms: now_ms });

    if index == state.danger_index {
        lose(state, LossReason::HitDanger, now_ms);
        return;
    }

    // Decoy flags never kill: any non-danger tile is a safe tap
    state.score += 1;
    state.emit(GameEvent::ScoreChanged { score: state.score });
    state.emit(GameEvent::Vibrate(&[12]));

    let cfg = phase_for(state.score);

    // Every tap refills the pressure clock at the current phase's limit
    state.time_limit_ms = cfg.time_limit_ms;
    state.time_left_ms = cfg.time_limit_ms;

    if PHASE_MILESTONES.contains(&state.score) {
        // Discrete difficulty jump: tear down and rearm at the new cadence
        arm_timers(state, &cfg, now_ms);
        state.emit(GameEvent::PhaseChanged { phase: cfg.phase });
        if cfg.phase >= 3 {
            state.blackout_until_ms = now_ms + 95.0;
            state.emit(GameEvent::Blackout { duration_ms: 95.0 });
        }
        if cfg.phase >= 4 {
            state.emit(GameEvent::Shake);
            state.emit(GameEvent::Vibrate(&[25, 30, 25]));
        }
    }

    after_tap_tricks(state, &cfg, now_ms);
    tap_chase(state, &cfg, now_ms);
    trigger_decoys(state, &cfg, now_ms);
    maybe_blackout(state, &cfg, now_ms);
}

/// Record a pointer move; ignored outside Playing.
pub fn pointer_moved(state: &mut RoundState, pos: Vec2, now_ms: f64) {
    if state.is_playing() {
        state.pointer = Some(PointerSample { pos, at_ms: now_ms });
    }
}

/// Re-measure the arena (debounced by the caller) and re-layout. Never
/// resets the score.
pub fn resized(state: &mut RoundState, arena: Arena, now_ms: f64) {
    state.arena = arena;
    if state.tiles.is_empty() {
        return;
    }

    let cfg = phase_for(state.score);
    layout_all(&mut state.tiles, &state.arena, &mut state.rng);
    if state.is_playing() {
        trigger_decoys(state, &cfg, now_ms);
        maybe_blackout(state, &cfg, now_ms);
        reposition_danger(state, &cfg, MoveReason::Resize, now_ms);
    }
}

/// Per-frame pump: runs due scheduled tasks, burns the pressure clock and
/// paces the heartbeat. Cheap no-op outside Playing, so the front end can
/// call it unconditionally.
pub fn advance(state: &mut RoundState, now_ms: f64) {
    if !state.is_playing() {
        return;
    }

    let dt = (now_ms - state.last_advance_ms).max(0.0);
    state.last_advance_ms = now_ms;

    state.time_left_ms = clamp_f64(state.time_left_ms - dt, 0.0, state.time_limit_ms);
    if state.time_left_ms <= 0.0 {
        lose(state, LossReason::OutOfTime, now_ms);
        return;
    }

    // Tile moves happen before decoy/blackout side effects, which happen
    // before any chained delayed task (one-shots fire on a later pump)
    for kind in state.scheduler.take_due(now_ms) {
        if !state.is_playing() {
            break;
        }
        let cfg = phase_for(state.score);
        match kind {
            TaskKind::MoveAll => {
                move_all(state, &cfg, now_ms);
                reposition_danger(state, &cfg, MoveReason::MoveAll, now_ms);
            }
            TaskKind::DangerSwap => swap_danger(state, &cfg, now_ms),
            TaskKind::Micro => {
                reposition_danger(state, &cfg, MoveReason::Micro, now_ms);
                trigger_decoys(state, &cfg, now_ms);
                maybe_blackout(state, &cfg, now_ms);
            }
            TaskKind::AfterTapReposition => {
                reposition_danger(state, &cfg, MoveReason::AfterTap, now_ms);
            }
            TaskKind::AfterTapSwap => swap_danger(state, &cfg, now_ms),
        }
    }

    heartbeat(state, now_ms);
}

/// Clear the persisted-best mirror. Storage clearing is the caller's job;
/// an in-progress round's score is untouched.
pub fn reset_best(state: &mut RoundState) {
    state.best = 0;
    state.emit(GameEvent::BestChanged { best: 0 });
}

/// Shuffle every tile, then run the misdirection layer.
fn move_all(state: &mut RoundState, cfg: &PhaseConfig, now_ms: f64) {
    layout_all(&mut state.tiles, &state.arena, &mut state.rng);
    trigger_decoys(state, cfg, now_ms);
    maybe_blackout(state, cfg, now_ms);
}

/// Cancel everything and arm the interval timers for `cfg`. The epoch bump
/// inside `cancel_all` is what guarantees no stale task survives.
fn arm_timers(state: &mut RoundState, cfg: &PhaseConfig, now_ms: f64) {
    state.time_limit_ms = cfg.time_limit_ms;
    state.time_left_ms = cfg.time_limit_ms;
    state.next_beat_ms = 0.0;
    state.last_advance_ms = now_ms;

    state.scheduler.cancel_all();
    state
        .scheduler
        .schedule_interval(TaskKind::MoveAll, now_ms, cfg.move_interval_ms);
    state
        .scheduler
        .schedule_interval(TaskKind::DangerSwap, now_ms, cfg.swap_interval_ms);
    if cfg.micro_interval_ms > 0.0 {
        state
            .scheduler
            .schedule_interval(TaskKind::Micro, now_ms, cfg.micro_interval_ms);
    }
}

/// Heartbeat pacing: faster and harder as the phase climbs and the clock
/// drains.
fn heartbeat(state: &mut RoundState, now_ms: f64) {
    let cfg = phase_for(state.score);
    let urgency = (1.0 - state.time_left_ms / state.time_limit_ms).clamp(0.0, 1.0) as f32;
    let intensity = (0.22 + cfg.phase as f32 * 0.12 + urgency * 0.58).clamp(0.22, 1.0);
    let interval = clamp_f64(
        BEAT_INTERVAL_MAX_MS - cfg.phase as f64 * 55.0 - urgency as f64 * 260.0,
        BEAT_INTERVAL_MIN_MS,
        BEAT_INTERVAL_MAX_MS,
    );

    if state.next_beat_ms == 0.0 {
        state.next_beat_ms = now_ms;
    }
    if now_ms >= state.next_beat_ms {
        state.emit(GameEvent::Beat { intensity });
        if cfg.phase >= 4 && urgency > 0.55 {
            state.emit(GameEvent::Vibrate(&[10]));
        }
        state.next_beat_ms = now_ms + interval;
    }
}

/// End the round: cancel every timer, settle the best score, emit the loss.
fn lose(state: &mut RoundState, reason: LossReason, now_ms: f64) {
    state.phase = RoundPhase::Ended;
    state.scheduler.cancel_all();

    if state.score > state.best {
        state.best = state.score;
        state.emit(GameEvent::BestChanged { best: state.best });
    }

    state.blackout_until_ms = now_ms + 120.0;
    state.emit(GameEvent::Blackout { duration_ms: 120.0 });
    state.emit(GameEvent::Shake);
    state.emit(GameEvent::Vibrate(&[80, 40, 120, 40, 160]));
    state.emit(GameEvent::RoundEnded { reason, score: state.score, best: state.best });

    log::info!("round over ({reason:?}), score {}, best {}", state.score, state.best);
}
