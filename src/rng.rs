//! Blended random source
//!
//! Two named channels feed every randomized decision:
//! - `daily`: a Pcg32 seeded from a hash of the UTC calendar date, so the
//!   hunting pattern repeats across players on the same day
//! - `ambient`: a Pcg32 seeded from OS entropy per session
//!
//! Position draws use the daily channel alone; yes/no decision rolls take a
//! weighted blend of both, so the daily challenge stays recognizable without
//! being tile-for-tile identical between runs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// FNV-1a 32-bit hash of the seed string
pub fn hash32(s: &str) -> u32 {
    let mut h: u32 = 2166136261;
    for b in s.bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(16777619);
    }
    h
}

/// UTC calendar date as `YYYY-MM-DD`, the daily challenge seed string
#[cfg(target_arch = "wasm32")]
pub fn daily_seed_str() -> String {
    let d = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        d.get_utc_full_year(),
        d.get_utc_month() + 1,
        d.get_utc_date()
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn daily_seed_str() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Dual-channel random source
#[derive(Debug, Clone)]
pub struct BlendedRng {
    daily: Pcg32,
    ambient: Pcg32,
}

impl BlendedRng {
    /// Production source: daily channel from the date-string hash, ambient
    /// channel from OS entropy
    pub fn for_day(seed_str: &str) -> Self {
        Self {
            daily: Pcg32::seed_from_u64(hash32(seed_str) as u64),
            ambient: Pcg32::seed_from_u64(rand::rng().random()),
        }
    }

    /// Fully seeded source for reproducible tests
    pub fn from_seeds(daily: u64, ambient: u64) -> Self {
        Self {
            daily: Pcg32::seed_from_u64(daily),
            ambient: Pcg32::seed_from_u64(ambient),
        }
    }

    /// Uniform deviate in [0, 1) from the daily channel
    #[inline]
    pub fn daily_f(&mut self) -> f32 {
        self.daily.random()
    }

    /// Uniform deviate in [0, 1) from the ambient channel
    #[inline]
    pub fn ambient_f(&mut self) -> f32 {
        self.ambient.random()
    }

    /// Weighted blend of one deviate from each channel.
    ///
    /// `daily_weight` is the daily channel's share; the result stays in [0, 1).
    /// Blend weights are tunable constants at each decision site, not semantics.
    #[inline]
    pub fn blend(&mut self, daily_weight: f32) -> f32 {
        self.daily_f() * daily_weight + self.ambient_f() * (1.0 - daily_weight)
    }

    /// Uniform f32 in [a, b) from the daily channel
    #[inline]
    pub fn daily_range_f(&mut self, a: f32, b: f32) -> f32 {
        a + self.daily_f() * (b - a)
    }

    /// Uniform integer in [a, b] (inclusive) from the daily channel
    #[inline]
    pub fn daily_range_i(&mut self, a: i32, b: i32) -> i32 {
        let r = (a as f32 + self.daily_f() * (b - a + 1) as f32).floor() as i32;
        r.min(b)
    }

    /// Uniform index in [0, len) from the daily channel
    #[inline]
    pub fn daily_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.daily_range_i(0, len as i32 - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash32_matches_fnv1a() {
        // FNV-1a reference values
        assert_eq!(hash32(""), 2166136261);
        assert_eq!(hash32("a"), 0xe40c292c);
        assert_eq!(hash32("2025-01-01"), hash32("2025-01-01"));
        assert_ne!(hash32("2025-01-01"), hash32("2025-01-02"));
    }

    #[test]
    fn test_daily_channel_reproducible() {
        let mut a = BlendedRng::from_seeds(42, 1);
        let mut b = BlendedRng::from_seeds(42, 2);
        for _ in 0..100 {
            assert_eq!(a.daily_f(), b.daily_f());
        }
    }

    #[test]
    fn test_blend_in_unit_interval() {
        let mut rng = BlendedRng::from_seeds(7, 8);
        for _ in 0..1000 {
            let v = rng.blend(0.6);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_daily_range_i_inclusive_bounds() {
        let mut rng = BlendedRng::from_seeds(3, 4);
        let mut saw_lo = false;
        let mut saw_hi = false;
        for _ in 0..10_000 {
            let v = rng.daily_range_i(2, 5);
            assert!((2..=5).contains(&v));
            saw_lo |= v == 2;
            saw_hi |= v == 5;
        }
        assert!(saw_lo && saw_hi);
    }

    #[test]
    fn test_daily_seed_str_shape() {
        let s = daily_seed_str();
        assert_eq!(s.len(), 10);
        assert_eq!(s.as_bytes()[4], b'-');
        assert_eq!(s.as_bytes()[7], b'-');
    }
}
