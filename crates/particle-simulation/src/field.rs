//! Pairwise force accumulation
//!
//! Applies velocity deltas only; positions are advanced by the integrator.

use glam::Vec2;
use particle_physics::forces::{
    attractor_delta, capture_magnitude, electromagnetic_magnitude, gravity_magnitude,
    gravity_pull, nuclear_magnitude, pair_delta,
};
use particle_physics::{ParticleType, StableParticle};

use crate::config::SimConfig;
use crate::store::EntityStore;

/// External point attractor for one tick (pointer drag, scripted orbit, ...)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointForce {
    pub position: Vec2,
    pub active: bool,
}

impl PointForce {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            active: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ForceField<'a> {
    config: &'a SimConfig,
}

impl<'a> ForceField<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config }
    }

    /// Combined pair magnitude between two particles (positive repels)
    pub fn pair_magnitude(&self, a: &StableParticle, b: &StableParticle) -> f32 {
        let c = self.config;
        let dist = a.position.distance(b.position);
        let (ta, tb) = (a.particle_type(), b.particle_type());
        let mut magnitude = 0.0;

        if ta.is_charged() && tb.is_charged() {
            magnitude += electromagnetic_magnitude(
                ta.charge(),
                tb.charge(),
                c.em_constant,
                dist,
                c.min_force_distance,
            );
        }
        if ta.is_nucleon() && tb.is_nucleon() {
            magnitude += nuclear_magnitude(
                c.nuclear_constant,
                dist,
                c.nuclear_threshold,
                c.min_force_distance,
            );
        }
        if !ta.is_charged() && !tb.is_charged() && dist > c.gravity_min_distance {
            magnitude += gravity_magnitude(c.gravity_constant, dist, c.min_force_distance);
        }
        if is_capture_pair(ta, tb) {
            magnitude += capture_magnitude(c.capture_strength, dist, c.capture_range);
        }
        magnitude
    }

    /// Accumulate every force law into entity velocities.
    pub fn apply(&self, store: &mut EntityStore, point_force: Option<PointForce>) {
        self.apply_particle_pairs(store.particles_mut());
        self.apply_fluctuation_gravity(store);
        if let Some(point) = point_force.filter(|p| p.active) {
            self.apply_attractor(store, point.position);
        }
    }

    fn apply_particle_pairs(&self, particles: &mut [StableParticle]) {
        for i in 0..particles.len() {
            let (head, tail) = particles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                let magnitude = self.pair_magnitude(a, b);
                if magnitude == 0.0 {
                    continue;
                }
                let delta = pair_delta(a.position, b.position, magnitude);
                a.velocity += delta;
                b.velocity -= delta;
            }
        }
    }

    fn apply_fluctuation_gravity(&self, store: &mut EntityStore) {
        let c = self.config;
        let (fluctuations, particles) = store.split_mut();
        for fluctuation in fluctuations.iter_mut() {
            for source in particles
                .iter()
                .filter(|p| p.particle_type().is_gravity_source())
            {
                if fluctuation.position.distance(source.position) > c.fluctuation_gravity_range {
                    continue;
                }
                fluctuation.velocity += gravity_pull(
                    fluctuation.position,
                    source.position,
                    c.gravity_constant,
                    c.min_force_distance,
                );
            }
        }
    }

    fn apply_attractor(&self, store: &mut EntityStore, point: Vec2) {
        let c = self.config;
        let (fluctuations, particles) = store.split_mut();
        for f in fluctuations.iter_mut() {
            f.velocity += attractor_delta(f.position, point, c.attractor_radius, c.attractor_strength);
        }
        for p in particles.iter_mut() {
            p.velocity += attractor_delta(p.position, point, c.attractor_radius, c.attractor_strength);
        }
    }
}

fn is_capture_pair(a: ParticleType, b: ParticleType) -> bool {
    matches!(
        (a, b),
        (ParticleType::Proton, ParticleType::Electron) | (ParticleType::Electron, ParticleType::Proton)
    )
}
