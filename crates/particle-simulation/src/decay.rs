//! Probabilistic decay of short-lived species
//!
//! Decay checks are throttled to ticks that are multiples of `decay_period`.
//! Each eligible particle is offered to the [`DecayOracle`] once per check.

use glam::Vec2;
use particle_physics::constants::{DECAY_PHOTONS, MUON_DECAY_SPARKS};
use particle_physics::{ParticleType, StableParticle};
use rand::Rng;

use crate::config::SimConfig;
use crate::oracle::DecayOracle;
use crate::reactions::ReactionContext;
use crate::store::{ChangeSet, EntityStore, ProductFactory};

#[derive(Debug, Clone, Copy)]
pub struct DecayScheduler<'a> {
    config: &'a SimConfig,
    factory: ProductFactory,
}

impl<'a> DecayScheduler<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self {
            config,
            factory: ProductFactory::from_config(config),
        }
    }

    pub fn is_decay_tick(&self, tick: u64) -> bool {
        tick % self.config.decay_period as u64 == 0
    }

    /// Run one decay check. Returns `None` on ticks where checks are throttled.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        tick: u64,
        store: &EntityStore,
        oracle: &mut dyn DecayOracle,
        ctx: &mut ReactionContext<'_, R>,
    ) -> Option<ChangeSet> {
        if !self.is_decay_tick(tick) {
            return None;
        }

        let mut changes = store.change_set();
        for (i, particle) in store.particles().iter().enumerate() {
            if !particle.is_decay_eligible() {
                continue;
            }
            let Some(probability) = self.config.decay.probability(particle.particle_type())
            else {
                continue;
            };
            ctx.counters.decay_checks += 1;
            if !oracle.decide(probability.clamp(0.0, 1.0)) {
                continue;
            }
            if changes.consume_particles(&[i]) {
                self.decay(particle, &mut changes, ctx);
            }
        }
        Some(changes)
    }

    fn decay<R: Rng + ?Sized>(
        &self,
        parent: &StableParticle,
        changes: &mut ChangeSet,
        ctx: &mut ReactionContext<'_, R>,
    ) {
        use ParticleType::*;

        let position = parent.position;
        let velocity = parent.velocity;
        let angle = ctx.rng.random_range(0.0..std::f32::consts::TAU);
        let kick = Vec2::from_angle(angle) * self.config.decay_ejection_speed;
        let products: &[ParticleType] = match parent.particle_type() {
            Neutron => {
                self.emit(changes, Proton, position, velocity, ctx.rng);
                self.emit(changes, Electron, position, velocity + kick, ctx.rng);
                &[Proton, Electron]
            }
            QuarkStrange => {
                ctx.log.photons(position, DECAY_PHOTONS);
                let to_up = self.config.strange_to_up_fraction.clamp(0.0, 1.0) as f64;
                if ctx.rng.random_bool(to_up) {
                    self.emit(changes, QuarkUp, position, velocity, ctx.rng);
                    self.emit(changes, Electron, position, velocity + kick, ctx.rng);
                    &[QuarkUp, Electron]
                } else {
                    self.emit(changes, QuarkDown, position, velocity, ctx.rng);
                    &[QuarkDown]
                }
            }
            Lambda => {
                self.emit(changes, Proton, position, velocity + kick, ctx.rng);
                self.emit(changes, PionMinus, position, velocity - kick, ctx.rng);
                &[Proton, PionMinus]
            }
            PionMinus => {
                ctx.log.photons(position, DECAY_PHOTONS);
                self.emit(changes, MuonMinus, position, velocity, ctx.rng);
                &[MuonMinus]
            }
            MuonMinus => {
                ctx.log.sparks(position, MUON_DECAY_SPARKS);
                self.emit(changes, Electron, position, kick, ctx.rng);
                &[Electron]
            }
            _ => &[],
        };

        ctx.counters.decays += 1;
        let names: Vec<&str> = products.iter().map(|p| p.name()).collect();
        ctx.log.reaction(
            position,
            format!(
                "{} decayed into {}",
                parent.particle_type().name(),
                names.join(" and ")
            ),
        );
    }

    fn emit<R: Rng + ?Sized>(
        &self,
        changes: &mut ChangeSet,
        kind: ParticleType,
        position: Vec2,
        velocity: Vec2,
        rng: &mut R,
    ) {
        changes.add_particle(self.factory.make(kind, position, velocity, rng));
    }
}
