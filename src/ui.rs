//! Presentation helpers
//!
//! Pure functions from round state to the values a front end draws: per-tile
//! visual flags, HUD meter percentages, taunt and end-of-round copy, and the
//! share-sheet text. Nothing here mutates the round.

use glam::Vec2;

use crate::sim::{LossReason, RoundState, phase_for};

/// Visual flags for one tile at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileView {
    pub pos: Vec2,
    pub danger: bool,
    /// Near-miss flash on the danger tile
    pub near_miss: bool,
    /// Decoy ("fake danger") flash; mutually cosmetic with `danger`
    pub decoy: bool,
}

/// Snapshot every tile's render flags at `now_ms`
pub fn tile_views(state: &RoundState, now_ms: f64) -> Vec<TileView> {
    state
        .tiles
        .iter()
        .map(|t| {
            let danger = t.index == state.danger_index;
            TileView {
                pos: t.pos,
                danger,
                near_miss: danger && state.near_miss_until_ms > now_ms,
                decoy: !danger && t.decoy_until_ms > now_ms,
            }
        })
        .collect()
}

/// Whether the blackout curtain is showing
pub fn blackout_active(state: &RoundState, now_ms: f64) -> bool {
    state.blackout_until_ms > now_ms
}

/// Danger-meter fill, 0-100
pub fn danger_meter_pct(state: &RoundState) -> f32 {
    let phase = phase_for(state.score).phase;
    (((phase - 1) as f32 / 4.0) * 100.0).clamp(0.0, 100.0)
}

/// Time-remaining fill, 0-100
pub fn time_pct(state: &RoundState) -> f32 {
    if state.time_limit_ms <= 0.0 {
        return 0.0;
    }
    ((state.time_left_ms / state.time_limit_ms) as f32 * 100.0).clamp(0.0, 100.0)
}

/// HUD hint shown at the start of every round
pub const IDLE_HINT: &str = "Tap any tile... but NOT the red one.";
pub const IDLE_SUBHINT: &str = "Hesitate and you lose. (Yes, really.)";

/// In-round taunt when the score hits a threshold; None between thresholds
pub fn taunt_for(score: u32) -> Option<&'static str> {
    match score {
        0 => Some(IDLE_HINT),
        3 => Some("Ok... now it gets ugly."),
        6 => Some("This is where EVERYONE dies."),
        9 => Some("Losing now would really hurt."),
        12 => Some("Record this. Nobody will believe you."),
        15 => Some("How are you still alive?"),
        s if s >= 16 => Some("This should be illegal."),
        _ => None,
    }
}

/// End-of-round card copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndCopy {
    pub title: &'static str,
    pub message: &'static str,
}

/// Title and message band for a final score
pub fn end_copy(score: u32) -> EndCopy {
    match score {
        0..=1 => EndCopy { title: "OUCH", message: "You lasted less than a blink." },
        2..=3 => EndCopy { title: "SO CLOSE", message: "One more. You can't leave like this." },
        4..=6 => EndCopy { title: "EVERYONE DIES HERE", message: "It's not you. (It's you.)" },
        7..=9 => EndCopy { title: "THAT HURTS", message: "You were doing so well." },
        10..=12 => EndCopy { title: "NO WAY", message: "That's highlight-reel territory." },
        13..=16 => EndCopy { title: "LEGEND?", message: "Ok... share it RIGHT NOW." },
        _ => EndCopy { title: "HACKER", message: "This is ridiculous. Share it." },
    }
}

/// Extra jab appended to the loss message
pub fn loss_extra(score: u32) -> &'static str {
    match score {
        0 => "You didn't even warm up.",
        1..=4 => "One more. Literally one more.",
        5..=9 => "This hurts because you were doing fine.",
        _ => "Ok... that was too much.",
    }
}

/// One-line loss reason for the end card
pub fn reason_line(reason: LossReason) -> &'static str {
    match reason {
        LossReason::HitDanger => "You tapped the red tile.",
        LossReason::OutOfTime => "You ran out of time.",
    }
}

/// Text handed to the share sheet / clipboard; `seed_str` is the daily
/// challenge date
pub fn share_text(score: u32, seed_str: &str) -> String {
    format!(
        "DON'T TAP THE RED (daily challenge {seed_str})\n\
         I survived {score} taps.\n\
         Think you can beat me?\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_TILE_H, DEFAULT_TILE_W};
    use crate::rng::BlendedRng;
    use crate::sim::{Arena, RoundPhase};

    fn state() -> RoundState {
        let arena = Arena::new(520.0, 640.0, DEFAULT_TILE_W, DEFAULT_TILE_H);
        RoundState::new(arena, BlendedRng::from_seeds(1, 2), 0)
    }

    #[test]
    fn test_tile_views_exactly_one_danger() {
        let s = state();
        let views = tile_views(&s, 0.0);
        assert_eq!(views.iter().filter(|v| v.danger).count(), 1);
        assert!(views[s.danger_index].danger);
    }

    #[test]
    fn test_flags_expire() {
        let mut s = state();
        s.near_miss_until_ms = 1_000.0;
        let decoy_idx = (s.danger_index + 1) % s.tiles.len();
        s.tiles[decoy_idx].decoy_until_ms = 1_000.0;

        let live = tile_views(&s, 999.0);
        assert!(live[s.danger_index].near_miss);
        assert!(live[decoy_idx].decoy);

        let expired = tile_views(&s, 1_000.0);
        assert!(!expired[s.danger_index].near_miss);
        assert!(!expired[decoy_idx].decoy);
    }

    #[test]
    fn test_danger_tile_never_reports_decoy() {
        let mut s = state();
        s.tiles[s.danger_index].decoy_until_ms = 5_000.0;
        let views = tile_views(&s, 0.0);
        assert!(!views[s.danger_index].decoy);
    }

    #[test]
    fn test_meters() {
        let mut s = state();
        assert_eq!(danger_meter_pct(&s), 0.0);
        s.score = 16;
        assert_eq!(danger_meter_pct(&s), 100.0);

        s.time_limit_ms = 1_000.0;
        s.time_left_ms = 250.0;
        assert_eq!(time_pct(&s), 25.0);
        s.time_left_ms = 0.0;
        assert_eq!(time_pct(&s), 0.0);
    }

    #[test]
    fn test_taunts_fire_on_thresholds_only() {
        assert!(taunt_for(0).is_some());
        assert!(taunt_for(1).is_none());
        assert!(taunt_for(3).is_some());
        assert!(taunt_for(14).is_none());
        assert!(taunt_for(16).is_some());
        assert_eq!(taunt_for(16), taunt_for(40));
    }

    #[test]
    fn test_end_copy_bands() {
        assert_eq!(end_copy(0), end_copy(1));
        assert_ne!(end_copy(1), end_copy(2));
        assert_eq!(end_copy(17).title, "HACKER");
    }

    #[test]
    fn test_share_text_carries_seed_and_score() {
        let text = share_text(9, "2026-08-27");
        assert!(text.contains("2026-08-27"));
        assert!(text.contains('9'));
    }

    #[test]
    fn test_views_dont_touch_state() {
        let mut s = state();
        s.phase = RoundPhase::Playing;
        let before: Vec<_> = s.tiles.iter().map(|t| t.pos).collect();
        let _ = tile_views(&s, 123.0);
        let _ = danger_meter_pct(&s);
        let after: Vec<_> = s.tiles.iter().map(|t| t.pos).collect();
        assert_eq!(before, after);
    }
}
