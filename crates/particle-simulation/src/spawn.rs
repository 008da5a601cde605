//! Chaos-driven fluctuation spawning
//!
//! The chaos parameter `r` starts fully chaotic and relaxes toward the floor
//! as attempts accumulate. A second logistic sequence (the gate) modulates
//! how often a spawn attempt goes through.

use glam::Vec2;
use particle_physics::{ColorCharge, Fluctuation};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::chaos::{logistic_step, sample_branches, Branch};
use crate::config::SimConfig;

#[derive(Debug, Clone)]
pub struct SpawnController {
    r: f32,
    attempts: u32,
    gate: f32,
}

/// Uniform draw in `[lo, hi)`, or the midpoint when the span is empty.
fn span<R: Rng + ?Sized>(lo: f32, hi: f32, rng: &mut R) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        (lo + hi) * 0.5
    }
}

impl SpawnController {
    pub fn new<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Self {
        Self {
            r: config.chaos_max,
            attempts: 0,
            gate: rng.random_range(0.1..0.9),
        }
    }

    pub fn chaos_parameter(&self) -> f32 {
        self.r
    }

    pub fn gate(&self) -> f32 {
        self.gate
    }

    fn advance<R: Rng + ?Sized>(&mut self, config: &SimConfig, rng: &mut R) {
        self.attempts += 1;
        if self.attempts >= config.chaos_decay_interval {
            self.r = (self.r - config.chaos_decay_rate).max(config.chaos_floor);
            self.attempts = 0;
        }

        let next = logistic_step(self.r as f64, self.gate as f64) as f32;
        self.gate = if next.is_finite() && next > 0.0 && next < 1.0 {
            next
        } else {
            rng.random_range(0.1..0.9)
        };
    }

    /// Run one spawn attempt. Returns the matter/antimatter pair to insert, if any.
    pub fn attempt<R: Rng + ?Sized>(
        &mut self,
        config: &SimConfig,
        live_count: usize,
        rng: &mut R,
    ) -> Option<[Fluctuation; 2]> {
        self.advance(config, rng);

        if live_count >= config.capacity {
            log::trace!("spawn skipped: {live_count} live entities at capacity");
            return None;
        }
        let spawn_chance = (self.gate * config.spawn_multiplier).clamp(0.0, 1.0);
        if !rng.random_bool(spawn_chance as f64) {
            return None;
        }

        let branches = sample_branches(self.r, config.seed_count, rng);
        let Some(value) = pick_branch(&branches, config.quark_bias, rng) else {
            log::trace!("spawn skipped: no attractor branches at r={:.4}", self.r);
            return None;
        };

        Some(self.emit_pair(config, value, rng))
    }

    fn emit_pair<R: Rng + ?Sized>(
        &self,
        config: &SimConfig,
        center_value: f32,
        rng: &mut R,
    ) -> [Fluctuation; 2] {
        let margin = config.spawn_margin;
        let center = Vec2::new(
            span(margin, config.world_width - margin, rng),
            span(margin, config.world_height - margin, rng),
        );
        let offset = Vec2::splat(config.spawn_offset);
        let velocity = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
            * config.spawn_speed;
        let chaos_level = rng.random::<f32>();

        let matter = Fluctuation::new(center - offset, velocity, center_value, chaos_level);
        let anti_state = matter.state().anti();
        let antimatter = Fluctuation::with_state(
            center + offset,
            -velocity,
            center_value,
            chaos_level,
            anti_state,
        );
        [matter, antimatter]
    }
}

/// Choose a branch value, restricted to quark-convertible states with
/// probability `quark_bias` (falling back to all branches if none qualify).
fn pick_branch<R: Rng + ?Sized>(branches: &[Branch], quark_bias: f32, rng: &mut R) -> Option<f32> {
    if branches.is_empty() {
        return None;
    }
    if rng.random_bool(quark_bias.clamp(0.0, 1.0) as f64) {
        let convertible: Vec<&Branch> = branches
            .iter()
            .filter(|b| ColorCharge::from_center_value(b.value).is_quark_convertible())
            .collect();
        if let Some(branch) = convertible.choose(rng) {
            return Some(branch.value);
        }
    }
    branches.choose(rng).map(|b| b.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn eager() -> SimConfig {
        SimConfig {
            spawn_multiplier: 1.0e6,
            seed_count: 10,
            ..SimConfig::default()
        }
    }

    #[test]
    fn pair_is_matter_and_antimatter() {
        let config = eager();
        let mut rng = StdRng::seed_from_u64(21);
        let mut spawner = SpawnController::new(&config, &mut rng);
        let [a, b] = (0..50)
            .find_map(|_| spawner.attempt(&config, 0, &mut rng))
            .expect("an eager spawner should emit a pair");

        assert_eq!(a.state().anti(), b.state());
        assert_eq!(a.center_value(), b.center_value());
        assert_eq!(a.chaos_level, b.chaos_level);
        assert_eq!(a.velocity, -b.velocity);
        let gap = b.position - a.position;
        assert!((gap - Vec2::splat(2.0 * config.spawn_offset)).length() < 1e-3);
    }

    #[test]
    fn capacity_blocks_spawning() {
        let config = eager();
        let mut rng = StdRng::seed_from_u64(2);
        let mut spawner = SpawnController::new(&config, &mut rng);
        for _ in 0..100 {
            assert!(spawner.attempt(&config, config.capacity, &mut rng).is_none());
        }
    }

    #[test]
    fn chaos_parameter_relaxes_to_floor() {
        let config = SimConfig {
            spawn_multiplier: 0.0,
            chaos_decay_interval: 1,
            chaos_decay_rate: 0.25,
            ..SimConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let mut spawner = SpawnController::new(&config, &mut rng);
        spawner.attempt(&config, 0, &mut rng);
        assert!((spawner.chaos_parameter() - 3.75).abs() < 1e-6);
        for _ in 0..20 {
            spawner.attempt(&config, 0, &mut rng);
        }
        assert_eq!(spawner.chaos_parameter(), config.chaos_floor);
    }

    #[test]
    fn gate_stays_inside_unit_interval() {
        let config = SimConfig {
            spawn_multiplier: 0.0,
            ..SimConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        let mut spawner = SpawnController::new(&config, &mut rng);
        for _ in 0..5000 {
            spawner.attempt(&config, 0, &mut rng);
            assert!(spawner.gate() > 0.0 && spawner.gate() < 1.0);
        }
    }

    #[test]
    fn full_quark_bias_picks_convertible_states() {
        let branches = [
            Branch { value: 0.05, weight: 1 },
            Branch { value: 0.8, weight: 1 },
        ];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(pick_branch(&branches, 1.0, &mut rng), Some(0.8));
        }
        assert_eq!(pick_branch(&[], 1.0, &mut rng), None);
    }
}
