//! Score-indexed difficulty table
//!
//! Hand-tuned bands; higher bands hunt harder, flash more lies at the player
//! and shrink every timing margin. Pure function of score, recomputed at each
//! decision point (score changes are rare next to the tick rate).

/// Difficulty configuration for one score band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseConfig {
    /// 1-based band index
    pub phase: u8,
    /// Short label for the HUD
    pub label: &'static str,
    /// Cadence of the all-tiles shuffle (ms)
    pub move_interval_ms: f64,
    /// Cadence of the danger-identity swap (ms)
    pub swap_interval_ms: f64,
    /// Extra reposition cadence, 0 = disabled (ms)
    pub micro_interval_ms: f64,
    /// Chance the danger tile hunts the player instead of placing fairly
    pub hunt_probability: f32,
    /// Hunting never lands closer to the player than this (px, pre-clamp)
    pub safe_radius: f32,
    /// Hunting never lands farther from the player than this (px, pre-clamp)
    pub hunt_radius: f32,
    /// Chance of a near-miss flash after a hunting reposition
    pub near_miss_probability: f32,
    /// Chance of flagging decoy tiles on a shuffle
    pub decoy_probability: f32,
    /// Chance of a blackout flash when input is fresh
    pub blackout_probability: f32,
    /// Time allowed between taps before the round is lost (ms)
    pub time_limit_ms: f64,
}

/// Difficulty for a given score. Total over all non-negative scores.
pub fn phase_for(score: u32) -> PhaseConfig {
    match score {
        0..=3 => PhaseConfig {
            phase: 1,
            label: "Warmup",
            move_interval_ms: 980.0,
            swap_interval_ms: 760.0,
            micro_interval_ms: 0.0,
            hunt_probability: 0.40,
            safe_radius: 98.0,
            hunt_radius: 150.0,
            near_miss_probability: 0.22,
            decoy_probability: 0.18,
            blackout_probability: 0.00,
            time_limit_ms: 1700.0,
        },
        4..=7 => PhaseConfig {
            phase: 2,
            label: "Getting weird",
            move_interval_ms: 900.0,
            swap_interval_ms: 680.0,
            micro_interval_ms: 0.0,
            hunt_probability: 0.62,
            safe_radius: 92.0,
            hunt_radius: 160.0,
            near_miss_probability: 0.32,
            decoy_probability: 0.28,
            blackout_probability: 0.12,
            time_limit_ms: 1450.0,
        },
        8..=11 => PhaseConfig {
            phase: 3,
            label: "Rage",
            move_interval_ms: 830.0,
            swap_interval_ms: 610.0,
            micro_interval_ms: 0.0,
            hunt_probability: 0.74,
            safe_radius: 86.0,
            hunt_radius: 170.0,
            near_miss_probability: 0.44,
            decoy_probability: 0.38,
            blackout_probability: 0.18,
            time_limit_ms: 1250.0,
        },
        12..=15 => PhaseConfig {
            phase: 4,
            label: "True chaos",
            move_interval_ms: 770.0,
            swap_interval_ms: 560.0,
            micro_interval_ms: 720.0,
            hunt_probability: 0.83,
            safe_radius: 82.0,
            hunt_radius: 182.0,
            near_miss_probability: 0.55,
            decoy_probability: 0.48,
            blackout_probability: 0.28,
            time_limit_ms: 1100.0,
        },
        _ => PhaseConfig {
            phase: 5,
            label: "Almost impossible",
            move_interval_ms: 720.0,
            swap_interval_ms: 520.0,
            micro_interval_ms: 620.0,
            hunt_probability: 0.90,
            safe_radius: 78.0,
            hunt_radius: 192.0,
            near_miss_probability: 0.66,
            decoy_probability: 0.58,
            blackout_probability: 0.36,
            time_limit_ms: 980.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_bands() {
        assert_eq!(phase_for(0).phase, 1);
        assert_eq!(phase_for(3).phase, 1);
        assert_eq!(phase_for(4).phase, 2);
        assert_eq!(phase_for(7).phase, 2);
        assert_eq!(phase_for(8).phase, 3);
        assert_eq!(phase_for(11).phase, 3);
        assert_eq!(phase_for(12).phase, 4);
        assert_eq!(phase_for(15).phase, 4);
        assert_eq!(phase_for(16).phase, 5);
        assert_eq!(phase_for(1_000_000).phase, 5);
    }

    #[test]
    fn test_aggressiveness_monotone_across_bands() {
        // One score per band, in ascending order
        let bands: Vec<PhaseConfig> = [0, 4, 8, 12, 16].iter().map(|&s| phase_for(s)).collect();
        for pair in bands.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            assert!(hi.hunt_probability >= lo.hunt_probability);
            assert!(hi.near_miss_probability >= lo.near_miss_probability);
            assert!(hi.decoy_probability >= lo.decoy_probability);
            assert!(hi.blackout_probability >= lo.blackout_probability);
            assert!(hi.move_interval_ms <= lo.move_interval_ms);
            assert!(hi.swap_interval_ms <= lo.swap_interval_ms);
            assert!(hi.time_limit_ms <= lo.time_limit_ms);
            assert!(hi.safe_radius <= lo.safe_radius);
            assert!(hi.hunt_radius >= lo.hunt_radius);
        }
    }

    #[test]
    fn test_constant_within_band() {
        assert_eq!(phase_for(0), phase_for(3));
        assert_eq!(phase_for(16), phase_for(999));
    }

    #[test]
    fn test_hunt_band_wider_than_safe() {
        for s in 0..40 {
            let cfg = phase_for(s);
            assert!(cfg.hunt_radius > cfg.safe_radius);
            assert!(cfg.safe_radius > 0.0);
        }
    }
}
