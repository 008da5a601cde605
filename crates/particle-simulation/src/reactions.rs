//! Collision-triggered transmutation rules
//!
//! Three scans run over a frozen view of the store: fluctuation pairs,
//! particle pairs, then quark triples. Every consumption goes through the
//! [`ChangeSet`], so an entity takes part in at most one reaction per tick.

use glam::Vec2;
use particle_physics::constants::{
    ANNIHILATION_SPARKS, FUSION_SPARKS, PAIR_ANNIHILATION_PHOTONS, QUARK_SPARKS,
};
use particle_physics::{Fluctuation, ParticleType, StableParticle};
use rand::Rng;

use crate::config::SimConfig;
use crate::events::EventLog;
use crate::stats::Counters;
use crate::store::{ChangeSet, EntityStore, ProductFactory};

/// Accumulators shared by every rule in one resolution pass
pub struct ReactionContext<'a, R: Rng + ?Sized> {
    pub rng: &'a mut R,
    pub log: &'a mut EventLog,
    pub counters: &'a mut Counters,
}

#[derive(Debug, Clone, Copy)]
pub struct ReactionEngine<'a> {
    config: &'a SimConfig,
    factory: ProductFactory,
}

fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

fn average_color(a: [u8; 3], b: [u8; 3]) -> [u8; 3] {
    std::array::from_fn(|i| ((a[i] as u16 + b[i] as u16) / 2) as u8)
}

fn is_pair(a: ParticleType, b: ParticleType, x: ParticleType, y: ParticleType) -> bool {
    (a == x && b == y) || (a == y && b == x)
}

enum PairOutcome {
    Annihilate,
    Combine(ParticleType, &'static str),
}

impl<'a> ReactionEngine<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self {
            config,
            factory: ProductFactory::from_config(config),
        }
    }

    /// Scan the store and return the consumptions and products for this tick.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        store: &EntityStore,
        ctx: &mut ReactionContext<'_, R>,
    ) -> ChangeSet {
        let mut changes = store.change_set();
        self.resolve_fluctuations(store.fluctuations(), &mut changes, ctx);
        self.resolve_particle_pairs(store.particles(), &mut changes, ctx);
        self.resolve_baryons(store.particles(), &mut changes, ctx);
        changes
    }

    fn resolve_fluctuations<R: Rng + ?Sized>(
        &self,
        fluctuations: &[Fluctuation],
        changes: &mut ChangeSet,
        ctx: &mut ReactionContext<'_, R>,
    ) {
        for i in 0..fluctuations.len() {
            for j in (i + 1)..fluctuations.len() {
                if changes.is_fluctuation_consumed(i) {
                    break;
                }
                if changes.is_fluctuation_consumed(j) {
                    continue;
                }
                let (a, b) = (&fluctuations[i], &fluctuations[j]);
                if a.position.distance(b.position) >= a.radius() + b.radius() {
                    continue;
                }
                if changes.consume_fluctuations(&[i, j]) {
                    self.collide_fluctuations(a, b, changes, ctx);
                }
            }
        }
    }

    fn collide_fluctuations<R: Rng + ?Sized>(
        &self,
        a: &Fluctuation,
        b: &Fluctuation,
        changes: &mut ChangeSet,
        ctx: &mut ReactionContext<'_, R>,
    ) {
        let center = midpoint(a.position, b.position);
        let velocity = midpoint(a.velocity, b.velocity);
        ctx.counters.reactions += 1;

        if a.state().annihilates_with(b.state())
            && ctx
                .rng
                .random_bool(self.config.annihilation_probability.clamp(0.0, 1.0) as f64)
        {
            let angle = ctx.rng.random_range(0.0..std::f32::consts::TAU);
            let ejection = Vec2::from_angle(angle) * self.config.pair_ejection_speed;
            changes.add_particle(self.factory.make(
                ParticleType::Electron,
                center,
                ejection,
                ctx.rng,
            ));
            changes.add_particle(self.factory.make(
                ParticleType::Positron,
                center,
                -ejection,
                ctx.rng,
            ));
            ctx.counters.matter_created += 2;
            ctx.log.sparks(center, ANNIHILATION_SPARKS);
            ctx.log.reaction(
                center,
                format!(
                    "{} and {} annihilated into an electron-positron pair",
                    a.state().name(),
                    b.state().name()
                ),
            );
            return;
        }

        if let Some(quark) = a.state().quark_with(b.state()) {
            changes.add_particle(self.factory.make(quark, center, velocity, ctx.rng));
            ctx.counters.matter_created += 1;
            ctx.log.sparks(center, QUARK_SPARKS);
            ctx.log.reaction(
                center,
                format!(
                    "{} formed from {} and {}",
                    quark.name(),
                    a.state().name(),
                    b.state().name()
                ),
            );
            return;
        }

        let combined_chaos = a.chaos_level + b.chaos_level;
        let (color, chaos_level) = if (a.center_value() - b.center_value()).abs() > 0.5 {
            let color: [u8; 3] = [ctx.rng.random(), ctx.rng.random(), ctx.rng.random()];
            (color, combined_chaos.min(1.0))
        } else {
            (average_color(a.color, b.color), (combined_chaos - 1.0).max(0.0))
        };
        let center_value = (a.center_value() + b.center_value()) * 0.5;
        let fused = Fluctuation::new(center, velocity, center_value, chaos_level).with_color(color);
        let state = fused.state();
        changes.add_fluctuation(fused);
        ctx.log.sparks(center, FUSION_SPARKS);
        ctx.log.reaction(
            center,
            format!(
                "{} and {} fused into {}",
                a.state().name(),
                b.state().name(),
                state.name()
            ),
        );
    }

    fn pair_outcome(&self, a: &StableParticle, b: &StableParticle) -> Option<PairOutcome> {
        use ParticleType::*;
        let (ta, tb) = (a.particle_type(), b.particle_type());
        let dist = a.position.distance(b.position);
        let touching = dist < a.radius() + b.radius();
        let capture = dist < self.config.capture_distance();

        if is_pair(ta, tb, Electron, Positron) && touching {
            return Some(PairOutcome::Annihilate);
        }
        if is_pair(ta, tb, Proton, Neutron)
            && dist < self.config.nuclear_threshold
            && (a.velocity + b.velocity).length() > self.config.deuterium_speed_floor
        {
            return Some(PairOutcome::Combine(Deuterium, "proton-neutron fusion"));
        }
        if is_pair(ta, tb, Proton, Electron) && capture {
            return Some(PairOutcome::Combine(HydrogenAtom, "electron capture"));
        }
        if is_pair(ta, tb, Deuterium, Electron) && capture {
            return Some(PairOutcome::Combine(DeuteriumAtom, "electron capture"));
        }
        if is_pair(ta, tb, Neutron, Positron) && touching {
            return Some(PairOutcome::Combine(Proton, "positron absorption"));
        }
        None
    }

    fn resolve_particle_pairs<R: Rng + ?Sized>(
        &self,
        particles: &[StableParticle],
        changes: &mut ChangeSet,
        ctx: &mut ReactionContext<'_, R>,
    ) {
        for i in 0..particles.len() {
            if particles[i].is_invulnerable() {
                continue;
            }
            for j in (i + 1)..particles.len() {
                if changes.is_particle_consumed(i) {
                    break;
                }
                let (a, b) = (&particles[i], &particles[j]);
                if b.is_invulnerable() || changes.is_particle_consumed(j) {
                    continue;
                }
                let Some(outcome) = self.pair_outcome(a, b) else {
                    continue;
                };
                if !changes.consume_particles(&[i, j]) {
                    continue;
                }

                let center = midpoint(a.position, b.position);
                ctx.counters.reactions += 1;
                match outcome {
                    PairOutcome::Annihilate => {
                        ctx.log.photons(center, PAIR_ANNIHILATION_PHOTONS);
                        ctx.log
                            .reaction(center, "Electron and Positron annihilated into photons");
                    }
                    PairOutcome::Combine(product, process) => {
                        let velocity = midpoint(a.velocity, b.velocity);
                        changes.add_particle(self.factory.make(product, center, velocity, ctx.rng));
                        ctx.counters.matter_stabilized += 1;
                        ctx.log.reaction(
                            center,
                            format!(
                                "{} formed from {} and {} by {process}",
                                product.name(),
                                a.particle_type().name(),
                                b.particle_type().name()
                            ),
                        );
                    }
                }
            }
        }
    }

    fn resolve_baryons<R: Rng + ?Sized>(
        &self,
        particles: &[StableParticle],
        changes: &mut ChangeSet,
        ctx: &mut ReactionContext<'_, R>,
    ) {
        let reach = 3.0 * self.config.nuclear_threshold;
        let quarks: Vec<usize> = particles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.particle_type().is_quark() && !p.is_invulnerable())
            .map(|(i, _)| i)
            .collect();

        for (n, &i) in quarks.iter().enumerate() {
            for (m, &j) in quarks.iter().enumerate().skip(n + 1) {
                for &k in quarks.iter().skip(m + 1) {
                    if [i, j, k].iter().any(|&x| changes.is_particle_consumed(x)) {
                        continue;
                    }
                    let triple = [&particles[i], &particles[j], &particles[k]];
                    let Some(baryon) =
                        ParticleType::baryon_from_quarks(triple.map(|q| q.particle_type()))
                    else {
                        continue;
                    };
                    let centroid = triple.iter().map(|q| q.position).sum::<Vec2>() / 3.0;
                    if triple.iter().any(|q| q.position.distance(centroid) > reach) {
                        continue;
                    }
                    if !changes.consume_particles(&[i, j, k]) {
                        continue;
                    }

                    let velocity = triple.iter().map(|q| q.velocity).sum::<Vec2>() / 3.0;
                    changes.add_particle(self.factory.make(baryon, centroid, velocity, ctx.rng));
                    ctx.counters.reactions += 1;
                    ctx.counters.matter_stabilized += 1;
                    ctx.log.sparks(centroid, FUSION_SPARKS);
                    ctx.log.reaction(
                        centroid,
                        format!(
                            "{} formed from {}, {} and {}",
                            baryon.name(),
                            triple[0].particle_type().name(),
                            triple[1].particle_type().name(),
                            triple[2].particle_type().name()
                        ),
                    );
                }
            }
        }
    }
}
