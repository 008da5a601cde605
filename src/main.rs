//! Chaotic Particle Sandbox
//!
//! Headless driver: runs the engine at a fixed tick count with a point
//! attractor orbiting the world center and logs HUD statistics.

use std::process::ExitCode;

use glam::Vec2;
use particle_simulation::{
    AmplitudeOracle, DecayOracle, EventKind, PointForce, SimConfig, SimEvent, Simulation,
    UniformOracle,
};

const TICKS: u64 = 3600;
const STATS_INTERVAL: u64 = 300;
/// Ticks per attractor revolution
const ORBIT_PERIOD: f32 = 720.0;
const ORBIT_RADIUS: f32 = 250.0;

fn orbiting_attractor(config: &SimConfig, tick: u64) -> PointForce {
    let center = Vec2::new(config.world_width, config.world_height) * 0.5;
    let angle = tick as f32 / ORBIT_PERIOD * std::f32::consts::TAU;
    PointForce::new(center + Vec2::from_angle(angle) * ORBIT_RADIUS)
}

fn run() -> particle_simulation::SimResult<()> {
    let seed = std::env::var("PARTICLES_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok());
    let config = SimConfig {
        rng_seed: seed,
        ..SimConfig::default()
    };

    // PARTICLES_ORACLE=amplitude swaps in the single-qubit draw
    let oracle: Box<dyn DecayOracle> = match std::env::var("PARTICLES_ORACLE").as_deref() {
        Ok("amplitude") => Box::new(AmplitudeOracle::new(seed)),
        _ => Box::new(UniformOracle::new(seed)),
    };

    let mut sim = Simulation::new(config, oracle)?;
    sim.set_reaction_sink(|line: &str| log::info!("{line}"));

    let mut sparks = 0u64;
    let mut photons = 0u64;
    for _ in 0..TICKS {
        let point = orbiting_attractor(sim.config(), sim.tick());
        for SimEvent { kind, count, .. } in sim.step(Some(point)) {
            match kind {
                EventKind::Spark => sparks += count as u64,
                EventKind::Photon => photons += count as u64,
                EventKind::ReactionLog => {}
            }
        }
        if sim.tick() % STATS_INTERVAL == 0 {
            log::info!("{}", sim.stats());
        }
    }

    let stats = sim.stats();
    log::info!(
        "Finished {} ticks: {} reactions, {} decays ({} checks), {sparks} sparks, {photons} photons",
        stats.tick,
        stats.counters.reactions,
        stats.counters.decays,
        stats.counters.decay_checks,
    );
    log::info!(
        "Stabilization ratio {:.2}% ({} of {} created)",
        stats.stabilization_ratio(),
        stats.counters.matter_stabilized,
        stats.counters.matter_created
    );
    Ok(())
}

fn main() -> ExitCode {
    // Initialize logger (RUST_LOG=debug for every reaction)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting chaotic particle sandbox...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
