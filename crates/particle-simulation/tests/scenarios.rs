//! End-to-end tick scenarios driven through `Simulation::step`.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use particle_physics::{ColorCharge, Fluctuation, ParticleType, StableParticle};
use particle_simulation::{SimConfig, Simulation};

fn quiet_config() -> SimConfig {
    SimConfig {
        spawn_multiplier: 0.0,
        rng_seed: Some(99),
        ..SimConfig::default()
    }
}

fn never_decays(config: SimConfig) -> Simulation {
    Simulation::new(config, Box::new(|_: f32| false)).unwrap()
}

fn count(sim: &Simulation, kind: ParticleType) -> usize {
    sim.particles()
        .iter()
        .filter(|p| p.particle_type() == kind)
        .count()
}

#[test]
fn red_antired_annihilate_into_lepton_pair() {
    let config = SimConfig {
        annihilation_probability: 1.0,
        ..quiet_config()
    };
    let mut sim = never_decays(config);
    let at = Vec2::new(400.0, 400.0);
    sim.add_fluctuation(Fluctuation::with_state(at, Vec2::ZERO, 0.9, 0.2, ColorCharge::Red));
    sim.add_fluctuation(Fluctuation::with_state(at, Vec2::ZERO, 0.9, 0.2, ColorCharge::AntiRed));

    sim.step(None);

    assert!(sim.fluctuations().is_empty());
    assert_eq!(count(&sim, ParticleType::Electron), 1);
    assert_eq!(count(&sim, ParticleType::Positron), 1);
    let [a, b] = [&sim.particles()[0], &sim.particles()[1]];
    assert_eq!(a.velocity, -b.velocity);
    assert!(a.velocity.length() > 0.0);
    // Both started at the midpoint and moved apart symmetrically
    assert!(((a.position + b.position) * 0.5 - at).length() < 1e-3);
}

#[test]
fn proton_neutron_fuse_into_deuterium() {
    let mut sim = never_decays(quiet_config());
    sim.add_particle(StableParticle::new(
        ParticleType::Proton,
        Vec2::new(500.0, 500.0),
        Vec2::new(1.0, 0.0),
    ));
    sim.add_particle(StableParticle::new(
        ParticleType::Neutron,
        Vec2::new(519.0, 500.0),
        Vec2::new(1.0, 0.0),
    ));

    sim.step(None);

    assert_eq!(sim.particles().len(), 1);
    let d = &sim.particles()[0];
    assert_eq!(d.particle_type(), ParticleType::Deuterium);
    assert!((d.velocity - Vec2::new(1.0, 0.0)).length() < 1e-4);
    // Created at the midpoint (509.5, 500), then integrated once
    assert!((d.position - Vec2::new(510.5, 500.0)).length() < 1e-3);
    assert_eq!(sim.stats().counters.matter_stabilized, 1);
}

#[test]
fn up_up_down_forms_a_proton_in_any_order() {
    use ParticleType::{QuarkDown as D, QuarkUp as U};
    let positions = [
        Vec2::new(300.0, 300.0),
        Vec2::new(312.0, 300.0),
        Vec2::new(306.0, 310.0),
    ];
    for order in [[U, U, D], [U, D, U], [D, U, U]] {
        let mut sim = never_decays(quiet_config());
        for (kind, position) in order.into_iter().zip(positions) {
            sim.add_particle(StableParticle::new(kind, position, Vec2::ZERO));
        }

        sim.step(None);

        assert_eq!(sim.particles().len(), 1, "order {order:?}");
        assert_eq!(count(&sim, ParticleType::Proton), 1, "order {order:?}");
    }
}

#[test]
fn decay_checks_only_run_on_period_multiples() {
    let config = SimConfig {
        decay_period: 5,
        ..quiet_config()
    };
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);
    let oracle = move |_: f32| {
        counter.set(counter.get() + 1);
        false
    };
    let mut sim = Simulation::new(config, Box::new(oracle)).unwrap();
    sim.add_particle(StableParticle::new(
        ParticleType::PionMinus,
        Vec2::new(100.0, 100.0),
        Vec2::ZERO,
    ));

    for _ in 0..4 {
        sim.step(None);
    }
    assert_eq!(calls.get(), 0);
    sim.step(None);
    assert_eq!(calls.get(), 1);
    for _ in 0..5 {
        sim.step(None);
    }
    assert_eq!(calls.get(), 2);
    assert_eq!(sim.stats().counters.decay_checks, 2);
}

#[test]
fn stacked_fluctuations_each_react_once() {
    let config = SimConfig {
        annihilation_probability: 1.0,
        ..quiet_config()
    };
    let mut sim = never_decays(config);
    let at = Vec2::new(800.0, 600.0);
    for state in [
        ColorCharge::Green,
        ColorCharge::AntiGreen,
        ColorCharge::Green,
        ColorCharge::AntiGreen,
    ] {
        sim.add_fluctuation(Fluctuation::with_state(at, Vec2::ZERO, 0.7, 0.0, state));
    }

    sim.step(None);

    assert!(sim.fluctuations().is_empty());
    assert_eq!(sim.particles().len(), 4);
    assert_eq!(sim.stats().counters.matter_created, 4);
}

#[test]
fn ids_survive_across_ticks() {
    let mut sim = never_decays(quiet_config());
    let id = sim.add_particle(StableParticle::new(
        ParticleType::HydrogenAtom,
        Vec2::new(50.0, 50.0),
        Vec2::new(2.0, 0.0),
    ));
    for _ in 0..10 {
        sim.step(None);
    }
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.tick, 10);
    let view = snapshot.get(id).unwrap();
    assert!((view.position.x - 70.0).abs() < 1e-3);
}

#[test]
fn attractor_draws_entities_in() {
    let mut sim = never_decays(quiet_config());
    sim.add_fluctuation(Fluctuation::new(Vec2::new(600.0, 600.0), Vec2::ZERO, 0.5, 0.0));
    let point = particle_simulation::PointForce::new(Vec2::new(650.0, 600.0));
    sim.step(Some(point));
    assert!(sim.fluctuations()[0].velocity.x > 0.0);
}

#[test]
fn spawner_populates_an_empty_world() {
    let config = SimConfig {
        rng_seed: Some(1234),
        spawn_multiplier: 5.0,
        ..SimConfig::default()
    };
    let mut sim = Simulation::with_uniform_oracle(config).unwrap();
    for _ in 0..120 {
        sim.step(None);
    }
    let stats = sim.stats();
    assert!(stats.counters.spawned_pairs > 0);
    assert!(stats.chaos_parameter < 4.0);
}
