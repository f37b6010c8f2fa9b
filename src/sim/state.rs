//! Round state and the task scheduler
//!
//! Everything the game core mutates lives in [`RoundState`]; the front end
//! owns exactly one and feeds it timestamps and input events. No rendering or
//! platform types appear here so the whole round is unit-testable.

use glam::Vec2;

use crate::consts::{POINTER_FRESH_MS, TAP_FRESH_MS, TILE_COUNT};
use crate::rng::BlendedRng;

use super::placement::Arena;

/// One tappable tile. The danger flag lives on [`RoundState::danger_index`],
/// not here; a tile only carries its own transient decoy flash.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub index: usize,
    /// Top-left corner, arena-local pixels
    pub pos: Vec2,
    /// Decoy ("fake danger") flash active until this timestamp
    pub decoy_until_ms: f64,
}

impl Tile {
    pub fn new(index: usize) -> Self {
        Self { index, pos: Vec2::ZERO, decoy_until_ms: 0.0 }
    }
}

/// Last known pointer or tap location
#[derive(Debug, Clone, Copy)]
pub struct PointerSample {
    pub pos: Vec2,
    pub at_ms: f64,
}

impl PointerSample {
    pub fn is_fresh(&self, now_ms: f64, window_ms: f64) -> bool {
        now_ms - self.at_ms < window_ms
    }
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Overlay shown, stats frozen, input ignored
    Idle,
    /// Timers active, taps accepted
    Playing,
    /// Terminal per round; the next `start` returns to Playing
    Ended,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    HitDanger,
    OutOfTime,
}

/// Events for the presentation layer (audio, vibration, HUD). Purely
/// informational; dropping them never affects the game outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    ScoreChanged { score: u32 },
    PhaseChanged { phase: u8 },
    /// Danger tile flashed a near-miss cue
    NearMiss { tile: usize },
    /// Decoy flags lit on these tiles
    Decoy { tiles: Vec<usize> },
    /// Full-arena blackout flash for this long
    Blackout { duration_ms: f64 },
    Shake,
    /// Vibration pattern in ms on/off pairs
    Vibrate(&'static [u32]),
    /// Heartbeat pulse; intensity in [0.22, 1.0]
    Beat { intensity: f32 },
    BestChanged { best: u32 },
    RoundEnded { reason: LossReason, score: u32, best: u32 },
}

/// Work the scheduler can run on the round's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Shuffle all tiles, then reposition the danger tile
    MoveAll,
    /// Transfer the danger flag to another tile
    DangerSwap,
    /// Extra reposition pressure in the high phases
    Micro,
    /// Delayed post-tap reposition
    AfterTapReposition,
    /// Delayed post-tap swap
    AfterTapSwap,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    kind: TaskKind,
    due_ms: f64,
    /// Repeat interval; None = one-shot
    every_ms: Option<f64>,
    epoch: u32,
}

/// Deadline-based task queue with epoch cancellation.
///
/// Rearming (phase milestone) or ending the round bumps the epoch; any task
/// carrying an older epoch is dead and can never fire. This is the "always
/// cancel before rearm" guarantee: no orphaned timer mutates a later round.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<Scheduled>,
    epoch: u32,
}

impl Scheduler {
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Drop every pending task and invalidate in-flight epochs
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
        self.tasks.clear();
    }

    pub fn schedule_interval(&mut self, kind: TaskKind, now_ms: f64, every_ms: f64) {
        self.tasks.push(Scheduled {
            kind,
            due_ms: now_ms + every_ms,
            every_ms: Some(every_ms),
            epoch: self.epoch,
        });
    }

    pub fn schedule_once(&mut self, kind: TaskKind, due_ms: f64) {
        self.tasks.push(Scheduled { kind, due_ms, every_ms: None, epoch: self.epoch });
    }

    /// Pending task count (current epoch only)
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| t.epoch == self.epoch).count()
    }

    /// Pop every task due at `now_ms`, oldest deadline first. Interval tasks
    /// are pushed forward past `now_ms`; one-shots are consumed.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<TaskKind> {
        self.tasks.retain(|t| t.epoch == self.epoch);

        let mut due: Vec<(f64, TaskKind)> = Vec::new();
        for task in self.tasks.iter_mut() {
            if task.due_ms > now_ms {
                continue;
            }
            due.push((task.due_ms, task.kind));
            if let Some(every) = task.every_ms {
                // Catch up without firing more than once per call
                while task.due_ms <= now_ms {
                    task.due_ms += every;
                }
            } else {
                task.due_ms = f64::INFINITY; // consumed, dropped below
            }
        }
        self.tasks.retain(|t| t.due_ms.is_finite());

        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, k)| k).collect()
    }
}

/// Complete state of one round (plus the persisted best, mirrored here for
/// the HUD)
#[derive(Debug, Clone)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub score: u32,
    pub best: u32,
    /// Index of the one dangerous tile; always valid while tiles exist
    pub danger_index: usize,
    pub tiles: Vec<Tile>,
    pub arena: Arena,

    /// Current phase's allowance between taps
    pub time_limit_ms: f64,
    pub time_left_ms: f64,
    pub(crate) last_advance_ms: f64,
    /// Next heartbeat deadline; 0 = fire on the next advance
    pub(crate) next_beat_ms: f64,

    pub pointer: Option<PointerSample>,
    pub tap: Option<PointerSample>,

    /// Near-miss flash on the danger tile active until this timestamp
    pub near_miss_until_ms: f64,
    /// Blackout flash active until this timestamp
    pub blackout_until_ms: f64,

    pub scheduler: Scheduler,
    pub rng: BlendedRng,
    events: Vec<GameEvent>,
}

impl RoundState {
    /// Fresh state in Idle with the initial danger tile drawn from the daily
    /// channel. Tiles are laid out if the arena is already measured.
    pub fn new(arena: Arena, mut rng: BlendedRng, best: u32) -> Self {
        let tiles: Vec<Tile> = (0..TILE_COUNT).map(Tile::new).collect();
        let danger_index = rng.daily_index(tiles.len());

        let mut state = Self {
            phase: RoundPhase::Idle,
            score: 0,
            best,
            danger_index,
            tiles,
            arena,
            time_limit_ms: super::phase::phase_for(0).time_limit_ms,
            time_left_ms: super::phase::phase_for(0).time_limit_ms,
            last_advance_ms: 0.0,
            next_beat_ms: 0.0,
            pointer: None,
            tap: None,
            near_miss_until_ms: 0.0,
            blackout_until_ms: 0.0,
            scheduler: Scheduler::default(),
            rng,
            events: Vec::new(),
        };
        super::placement::layout_all(&mut state.tiles, &state.arena, &mut state.rng);
        state
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing
    }

    /// Pointer sample fresh enough to hunt against
    pub fn fresh_pointer(&self, now_ms: f64) -> Option<PointerSample> {
        self.pointer.filter(|p| p.is_fresh(now_ms, POINTER_FRESH_MS))
    }

    /// Tap sample fresh enough to anchor a hunt blend
    pub fn fresh_tap(&self, now_ms: f64) -> Option<PointerSample> {
        self.tap.filter(|t| t.is_fresh(now_ms, TAP_FRESH_MS))
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain events accumulated since the last call; the front end turns
    /// these into sound, vibration and HUD updates.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_TILE_H, DEFAULT_TILE_W};

    fn arena() -> Arena {
        Arena::new(520.0, 640.0, DEFAULT_TILE_W, DEFAULT_TILE_H)
    }

    #[test]
    fn test_new_state_invariants() {
        let state = RoundState::new(arena(), BlendedRng::from_seeds(1, 2), 7);
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 7);
        assert_eq!(state.tiles.len(), TILE_COUNT);
        assert!(state.danger_index < TILE_COUNT);
    }

    #[test]
    fn test_scheduler_interval_cadence() {
        let mut s = Scheduler::default();
        s.schedule_interval(TaskKind::MoveAll, 0.0, 100.0);
        assert!(s.take_due(50.0).is_empty());
        assert_eq!(s.take_due(100.0), vec![TaskKind::MoveAll]);
        assert!(s.take_due(150.0).is_empty());
        assert_eq!(s.take_due(200.0), vec![TaskKind::MoveAll]);
    }

    #[test]
    fn test_scheduler_one_shot_consumed() {
        let mut s = Scheduler::default();
        s.schedule_once(TaskKind::AfterTapSwap, 80.0);
        assert_eq!(s.take_due(80.0), vec![TaskKind::AfterTapSwap]);
        assert!(s.take_due(500.0).is_empty());
    }

    #[test]
    fn test_scheduler_orders_by_deadline() {
        let mut s = Scheduler::default();
        s.schedule_once(TaskKind::AfterTapSwap, 90.0);
        s.schedule_once(TaskKind::AfterTapReposition, 55.0);
        assert_eq!(
            s.take_due(100.0),
            vec![TaskKind::AfterTapReposition, TaskKind::AfterTapSwap]
        );
    }

    #[test]
    fn test_cancel_all_kills_pending_tasks() {
        let mut s = Scheduler::default();
        s.schedule_interval(TaskKind::DangerSwap, 0.0, 50.0);
        s.schedule_once(TaskKind::AfterTapReposition, 60.0);
        s.cancel_all();
        assert_eq!(s.pending(), 0);
        assert!(s.take_due(1_000.0).is_empty());
    }

    #[test]
    fn test_stale_epoch_task_never_fires() {
        let mut s = Scheduler::default();
        s.schedule_once(TaskKind::AfterTapSwap, 100.0);
        s.cancel_all();
        // Rearm at the new epoch
        s.schedule_interval(TaskKind::MoveAll, 100.0, 500.0);
        let fired = s.take_due(600.0);
        assert_eq!(fired, vec![TaskKind::MoveAll]);
    }

    #[test]
    fn test_interval_fires_once_per_call_when_behind() {
        let mut s = Scheduler::default();
        s.schedule_interval(TaskKind::Micro, 0.0, 10.0);
        // Far behind: one catch-up fire, then back on cadence
        assert_eq!(s.take_due(95.0).len(), 1);
        assert!(s.take_due(99.0).is_empty());
        assert_eq!(s.take_due(110.0).len(), 1);
    }

    #[test]
    fn test_sample_freshness() {
        let p = PointerSample { pos: Vec2::new(10.0, 10.0), at_ms: 1_000.0 };
        assert!(p.is_fresh(1_800.0, POINTER_FRESH_MS));
        assert!(!p.is_fresh(1_901.0, POINTER_FRESH_MS));
    }
}
