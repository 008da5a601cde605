//! Simulation context and tick pipeline
//!
//! One [`Simulation`] owns every piece of mutable state: the entity store,
//! the spawn controller, the random source and the injected decay oracle.
//! [`Simulation::step`] runs spawn, force, reaction, decay and integration in
//! that order with no suspension points.

use std::collections::BTreeMap;

use glam::Vec2;
use particle_physics::{EntityId, Fluctuation, StableParticle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::decay::DecayScheduler;
use crate::error::SimResult;
use crate::events::{EventKind, EventLog, ReactionSink, SimEvent};
use crate::field::{ForceField, PointForce};
use crate::oracle::{DecayOracle, UniformOracle};
use crate::reactions::{ReactionContext, ReactionEngine};
use crate::snapshot::Snapshot;
use crate::spawn::SpawnController;
use crate::stats::{Counters, Stats};
use crate::store::EntityStore;

pub struct Simulation {
    config: SimConfig,
    store: EntityStore,
    spawner: SpawnController,
    oracle: Box<dyn DecayOracle>,
    sink: Option<Box<dyn ReactionSink>>,
    rng: StdRng,
    tick: u64,
    counters: Counters,
}

impl Simulation {
    /// Validate `config` and build an empty world.
    pub fn new(config: SimConfig, oracle: Box<dyn DecayOracle>) -> SimResult<Self> {
        config.validate()?;
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let spawner = SpawnController::new(&config, &mut rng);
        log::info!(
            "Simulation initialized: {}x{} world, capacity {}, r={:.2}",
            config.world_width,
            config.world_height,
            config.capacity,
            spawner.chaos_parameter()
        );

        Ok(Self {
            config,
            store: EntityStore::new(),
            spawner,
            oracle,
            sink: None,
            rng,
            tick: 0,
            counters: Counters::default(),
        })
    }

    /// Build with a [`UniformOracle`] seeded alongside the world RNG.
    pub fn with_uniform_oracle(config: SimConfig) -> SimResult<Self> {
        let oracle = UniformOracle::new(config.rng_seed.map(|seed| seed.wrapping_add(1)));
        Self::new(config, Box::new(oracle))
    }

    pub fn set_reaction_sink(&mut self, sink: impl ReactionSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of completed ticks
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn chaos_parameter(&self) -> f32 {
        self.spawner.chaos_parameter()
    }

    pub fn fluctuations(&self) -> &[Fluctuation] {
        self.store.fluctuations()
    }

    pub fn particles(&self) -> &[StableParticle] {
        self.store.particles()
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Insert a fluctuation directly, bypassing the spawn controller.
    pub fn add_fluctuation(&mut self, fluctuation: Fluctuation) -> EntityId {
        self.store.insert_fluctuation(fluctuation)
    }

    /// Insert a particle directly (scenario setup, scripted sources).
    pub fn add_particle(&mut self, particle: StableParticle) -> EntityId {
        self.store.insert_particle(particle)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.tick, &self.store)
    }

    pub fn stats(&self) -> Stats {
        let mut particle_counts = BTreeMap::new();
        for particle in self.store.particles() {
            *particle_counts.entry(particle.particle_type()).or_insert(0) += 1;
        }
        Stats {
            tick: self.tick,
            chaos_parameter: self.spawner.chaos_parameter(),
            fluctuations: self.store.fluctuations().len(),
            particle_counts,
            counters: self.counters,
        }
    }

    /// Advance the world by one tick and return the events it produced.
    pub fn step(&mut self, point_force: Option<PointForce>) -> Vec<SimEvent> {
        self.tick += 1;
        let tick = self.tick;
        let mut log = EventLog::new();

        self.spawn();

        if tick % self.config.force_period as u64 == 0 {
            ForceField::new(&self.config).apply(&mut self.store, point_force);
        }

        let mut ctx = ReactionContext {
            rng: &mut self.rng,
            log: &mut log,
            counters: &mut self.counters,
        };
        let reactions = ReactionEngine::new(&self.config).resolve(&self.store, &mut ctx);
        self.store.commit(reactions);

        let decays = DecayScheduler::new(&self.config).resolve(
            tick,
            &self.store,
            self.oracle.as_mut(),
            &mut ctx,
        );
        if let Some(decays) = decays {
            self.store.commit(decays);
        }

        self.integrate();

        let events = log.into_events();
        if let Some(sink) = self.sink.as_mut() {
            events
                .iter()
                .filter(|e| e.kind == EventKind::ReactionLog)
                .filter_map(|e| e.message.as_deref())
                .for_each(|message| sink.on_reaction(message));
        }
        events
    }

    fn spawn(&mut self) {
        let live = self.store.len();
        let Some(pair) = self.spawner.attempt(&self.config, live, &mut self.rng) else {
            return;
        };
        for fluctuation in pair {
            self.store.insert_fluctuation(fluctuation);
        }
        self.counters.spawned_pairs += 1;
    }

    /// Clamp speed, advance positions and wrap them into the world.
    fn integrate(&mut self) {
        let bounds = Vec2::new(self.config.world_width, self.config.world_height);
        let max_speed = self.config.max_speed;
        let (fluctuations, particles) = self.store.split_mut();

        for f in fluctuations.iter_mut() {
            f.velocity = limit_speed(f.velocity, max_speed);
            f.position = wrap(f.position + f.velocity, bounds);
        }
        for p in particles.iter_mut() {
            p.velocity = limit_speed(p.velocity, max_speed);
            p.position = wrap(p.position + p.velocity, bounds);
            p.tick_timers();
        }
    }
}

fn limit_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    if velocity.is_finite() {
        velocity.clamp_length_max(max_speed)
    } else {
        Vec2::ZERO
    }
}

fn wrap_axis(value: f32, bound: f32) -> f32 {
    let wrapped = value.rem_euclid(bound);
    // rem_euclid rounds tiny negatives up to `bound` itself
    if wrapped >= bound {
        0.0
    } else {
        wrapped
    }
}

fn wrap(position: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(position.x, bounds.x), wrap_axis(position.y, bounds.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecayTable;
    use crate::error::SimError;
    use particle_physics::ParticleType;

    fn quiet() -> SimConfig {
        SimConfig {
            spawn_multiplier: 0.0,
            rng_seed: Some(7),
            ..SimConfig::default()
        }
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = SimConfig {
            world_width: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulation::with_uniform_oracle(config),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn positions_wrap_at_bounds() {
        let mut sim = Simulation::with_uniform_oracle(quiet()).unwrap();
        sim.add_particle(StableParticle::new(
            ParticleType::Proton,
            Vec2::new(1919.5, 2.0),
            Vec2::new(1.0, -3.0),
        ));
        sim.step(None);
        let p = &sim.particles()[0];
        assert!((p.position.x - 0.5).abs() < 1e-3);
        assert!((p.position.y - 1079.0).abs() < 1e-3);
    }

    #[test]
    fn speed_is_clamped() {
        let mut sim = Simulation::with_uniform_oracle(quiet()).unwrap();
        sim.add_particle(StableParticle::new(
            ParticleType::Neutron,
            Vec2::new(500.0, 500.0),
            Vec2::new(100.0, 0.0),
        ));
        sim.step(None);
        let p = &sim.particles()[0];
        assert!((p.velocity.length() - sim.config().max_speed).abs() < 1e-4);
        assert!((p.position.x - 512.0).abs() < 1e-3);
    }

    #[test]
    fn spawning_fills_the_world_up_to_capacity() {
        let config = SimConfig {
            spawn_multiplier: 1.0e6,
            capacity: 10,
            seed_count: 10,
            rng_seed: Some(3),
            decay: DecayTable {
                neutron: 0.0,
                quark_strange: 0.0,
                lambda: 0.0,
                pion_minus: 0.0,
                muon_minus: 0.0,
            },
            ..SimConfig::default()
        };
        let mut sim = Simulation::with_uniform_oracle(config).unwrap();
        for _ in 0..200 {
            sim.step(None);
            // Soft cap: one pair may land on top of capacity - 1
            assert!(sim.fluctuations().len() + sim.particles().len() <= 11);
        }
        assert!(sim.counters().spawned_pairs > 0);
    }

    #[test]
    fn sink_receives_reaction_lines() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let lines = Rc::new(RefCell::new(Vec::<String>::new()));
        let mut sim = Simulation::with_uniform_oracle(quiet()).unwrap();
        let captured = Rc::clone(&lines);
        sim.set_reaction_sink(move |line: &str| captured.borrow_mut().push(line.to_owned()));

        sim.add_particle(StableParticle::new(ParticleType::Electron, Vec2::new(300.0, 300.0), Vec2::ZERO));
        sim.add_particle(StableParticle::new(ParticleType::Positron, Vec2::new(303.0, 300.0), Vec2::ZERO));
        sim.step(None);

        assert!(sim.particles().is_empty());
        assert_eq!(lines.borrow().len(), 1);
        assert!(lines.borrow()[0].contains("annihilated"));
    }

    #[test]
    fn stats_count_species() {
        let mut sim = Simulation::with_uniform_oracle(quiet()).unwrap();
        for x in [100.0, 400.0, 700.0] {
            sim.add_particle(StableParticle::new(ParticleType::HydrogenAtom, Vec2::new(x, 100.0), Vec2::ZERO));
        }
        sim.step(None);
        let stats = sim.stats();
        assert_eq!(stats.tick, 1);
        assert_eq!(stats.count(ParticleType::HydrogenAtom), 3);
        assert_eq!(stats.particles(), 3);
    }
}
