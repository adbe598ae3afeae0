//! Sparkle trail behind the falling star (cosmetic only)

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single fading sparkle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sparkle {
    /// Centre of the sparkle sprite
    pub pos: Vec2,
    /// Opacity in [0, 1]
    pub alpha: f32,
}

/// Bounded FIFO of sparkles, oldest first.
///
/// Sparkles leave only through the capacity bound; a fully faded sparkle
/// stays queued (invisible) until it is pushed out.
#[derive(Debug, Clone)]
pub struct SparkleTrail {
    queue: VecDeque<Sparkle>,
    cap: usize,
    fade: f32,
    jitter: f32,
}

impl SparkleTrail {
    pub fn new(cap: usize, fade: f32, jitter: f32) -> Self {
        Self {
            queue: VecDeque::with_capacity(cap + 1),
            cap,
            fade,
            jitter,
        }
    }

    /// Fade every queued sparkle, then emit a fresh one around `center`
    pub fn emit<R: Rng + ?Sized>(&mut self, center: Vec2, rng: &mut R) {
        for sparkle in self.queue.iter_mut() {
            sparkle.alpha = (sparkle.alpha - self.fade).max(0.0);
        }

        let offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * self.jitter,
            (rng.random::<f32>() - 0.5) * self.jitter,
        );
        self.queue.push_back(Sparkle {
            pos: center + offset,
            alpha: 1.0,
        });

        while self.queue.len() > self.cap {
            self.queue.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Sparkle> {
        self.queue.iter()
    }

    pub fn newest(&self) -> Option<&Sparkle> {
        self.queue.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_emit_appends_full_alpha() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut trail = SparkleTrail::new(20, 0.02, 15.0);
        trail.emit(Vec2::new(100.0, 100.0), &mut rng);
        let sparkle = trail.newest().copied().unwrap();
        assert_eq!(sparkle.alpha, 1.0);
        assert!((sparkle.pos.x - 100.0).abs() <= 7.5);
        assert!((sparkle.pos.y - 100.0).abs() <= 7.5);
    }

    #[test]
    fn test_existing_sparkles_fade() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut trail = SparkleTrail::new(20, 0.02, 15.0);
        trail.emit(Vec2::ZERO, &mut rng);
        trail.emit(Vec2::ZERO, &mut rng);
        trail.emit(Vec2::ZERO, &mut rng);
        let alphas: Vec<f32> = trail.iter().map(|s| s.alpha).collect();
        assert!((alphas[0] - 0.96).abs() < 1e-6);
        assert!((alphas[1] - 0.98).abs() < 1e-6);
        assert_eq!(alphas[2], 1.0);
    }

    #[test]
    fn test_faded_sparkles_are_kept() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Fast fade so the oldest reaches zero well before eviction
        let mut trail = SparkleTrail::new(20, 0.5, 0.0);
        for _ in 0..5 {
            trail.emit(Vec2::ZERO, &mut rng);
        }
        assert_eq!(trail.len(), 5);
        assert_eq!(trail.iter().next().map(|s| s.alpha), Some(0.0));
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut trail = SparkleTrail::new(3, 0.02, 0.0);
        for i in 0..5 {
            trail.emit(Vec2::new(i as f32, 0.0), &mut rng);
        }
        let xs: Vec<f32> = trail.iter().map(|s| s.pos.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    proptest! {
        #[test]
        fn length_never_exceeds_cap(ticks in 0usize..200, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut trail = SparkleTrail::new(20, 0.02, 15.0);
            for _ in 0..ticks {
                trail.emit(Vec2::new(50.0, 50.0), &mut rng);
                prop_assert!(trail.len() <= 20);
            }
            prop_assert_eq!(trail.len(), ticks.min(20));
            for sparkle in trail.iter() {
                prop_assert!((0.0..=1.0).contains(&sparkle.alpha));
            }
        }
    }
}
