//! Simulation configuration
//!
//! Supplied once at construction and immutable afterward. Defaults are tuned
//! for a 1920x1080 world running at 60 ticks per second.

use particle_physics::{constants, ParticleType};

use crate::error::{SimError, SimResult};

/// Per-check decay probabilities for each species with a decay channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayTable {
    pub neutron: f32,
    pub quark_strange: f32,
    pub lambda: f32,
    pub pion_minus: f32,
    pub muon_minus: f32,
}

impl Default for DecayTable {
    fn default() -> Self {
        Self {
            neutron: 0.001,
            quark_strange: 0.05,
            lambda: 0.02,
            pion_minus: 0.2,
            muon_minus: 0.08,
        }
    }
}

impl DecayTable {
    /// Probability for `particle_type`, or `None` if the species never decays.
    pub fn probability(&self, particle_type: ParticleType) -> Option<f32> {
        match particle_type {
            ParticleType::Neutron => Some(self.neutron),
            ParticleType::QuarkStrange => Some(self.quark_strange),
            ParticleType::Lambda => Some(self.lambda),
            ParticleType::PionMinus => Some(self.pion_minus),
            ParticleType::MuonMinus => Some(self.muon_minus),
            _ => None,
        }
    }

    fn entries(&self) -> [(&'static str, f32); 5] {
        [
            ("neutron", self.neutron),
            ("quark_strange", self.quark_strange),
            ("lambda", self.lambda),
            ("pion_minus", self.pion_minus),
            ("muon_minus", self.muon_minus),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    // World
    pub world_width: f32,
    pub world_height: f32,
    /// RNG seed for reproducible runs; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,

    // Forces
    pub em_constant: f32,
    pub gravity_constant: f32,
    /// Nuclear coupling; must be <= 0 so nucleons attract
    pub nuclear_constant: f32,
    pub nuclear_threshold: f32,
    /// Extra reach for electron capture rules (hydrogen, deuterium atom)
    pub capture_margin: f32,
    pub min_force_distance: f32,
    pub gravity_min_distance: f32,
    /// Radius within which massive particles pull on fluctuations
    pub fluctuation_gravity_range: f32,
    pub capture_strength: f32,
    pub capture_range: f32,
    pub attractor_radius: f32,
    pub attractor_strength: f32,
    /// Apply forces every N ticks
    pub force_period: u32,

    // Spawning
    /// Soft ceiling on live entities, checked only at spawn time
    pub capacity: usize,
    pub spawn_multiplier: f32,
    pub chaos_max: f32,
    pub chaos_floor: f32,
    pub chaos_decay_interval: u32,
    pub chaos_decay_rate: f32,
    pub seed_count: usize,
    /// Chance of restricting branch selection to quark-convertible states
    pub quark_bias: f32,
    pub spawn_margin: f32,
    pub spawn_offset: f32,
    pub spawn_speed: f32,

    // Reactions
    pub annihilation_probability: f32,
    pub pair_ejection_speed: f32,
    /// Minimum |v1 + v2| for proton-neutron fusion
    pub deuterium_speed_floor: f32,
    pub invulnerability_ticks: u32,

    // Decay
    /// Decay checks run only on ticks that are multiples of this
    pub decay_period: u32,
    pub decay: DecayTable,
    /// Upper bound of the random delay before short-lived species may decay
    pub decay_delay_max: u32,
    pub strange_to_up_fraction: f32,
    pub decay_ejection_speed: f32,

    // Integration
    pub max_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: 1920.0,
            world_height: 1080.0,
            rng_seed: None,

            em_constant: constants::EM_CONSTANT,
            gravity_constant: constants::GRAVITY_CONSTANT,
            nuclear_constant: constants::NUCLEAR_CONSTANT,
            nuclear_threshold: constants::NUCLEAR_THRESHOLD,
            capture_margin: constants::CAPTURE_MARGIN,
            min_force_distance: constants::MIN_FORCE_DISTANCE,
            gravity_min_distance: constants::GRAVITY_MIN_DISTANCE,
            fluctuation_gravity_range: 400.0,
            capture_strength: 5.0,
            capture_range: 100.0,
            attractor_radius: 150.0,
            attractor_strength: 7.5,
            force_period: 1,

            capacity: 240,
            spawn_multiplier: 0.5,
            chaos_max: 4.0,
            chaos_floor: 3.0,
            chaos_decay_interval: 50,
            chaos_decay_rate: 0.005,
            seed_count: 80,
            quark_bias: 0.5,
            spawn_margin: 100.0,
            spawn_offset: 50.0,
            spawn_speed: 1.0,

            annihilation_probability: 0.8,
            pair_ejection_speed: 1.5,
            deuterium_speed_floor: 1.0,
            invulnerability_ticks: 60,

            decay_period: 30,
            decay: DecayTable::default(),
            decay_delay_max: 300,
            strange_to_up_fraction: 0.94,
            decay_ejection_speed: 2.0,

            max_speed: 12.0,
        }
    }
}

fn ensure(condition: bool, message: impl Into<String>) -> SimResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(message.into()))
    }
}

fn ensure_finite(name: &str, value: f32) -> SimResult<()> {
    ensure(value.is_finite(), format!("{name} must be finite, got {value}"))
}

fn ensure_non_negative(name: &str, value: f32) -> SimResult<()> {
    ensure(
        value.is_finite() && value >= 0.0,
        format!("{name} must be a non-negative finite number, got {value}"),
    )
}

fn ensure_positive(name: &str, value: f32) -> SimResult<()> {
    ensure(
        value.is_finite() && value > 0.0,
        format!("{name} must be > 0, got {value}"),
    )
}

impl SimConfig {
    /// Reject out-of-range constants.
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive("world_width", self.world_width)?;
        ensure_positive("world_height", self.world_height)?;

        ensure_non_negative("em_constant", self.em_constant)?;
        ensure_non_negative("gravity_constant", self.gravity_constant)?;
        ensure_finite("nuclear_constant", self.nuclear_constant)?;
        ensure(
            self.nuclear_constant <= 0.0,
            format!(
                "nuclear_constant must be <= 0 (attractive), got {}",
                self.nuclear_constant
            ),
        )?;
        ensure_positive("nuclear_threshold", self.nuclear_threshold)?;
        ensure_non_negative("capture_margin", self.capture_margin)?;
        ensure_positive("min_force_distance", self.min_force_distance)?;
        ensure_non_negative("gravity_min_distance", self.gravity_min_distance)?;
        ensure_non_negative("fluctuation_gravity_range", self.fluctuation_gravity_range)?;
        ensure_non_negative("capture_strength", self.capture_strength)?;
        ensure_non_negative("capture_range", self.capture_range)?;
        ensure_non_negative("attractor_radius", self.attractor_radius)?;
        ensure_non_negative("attractor_strength", self.attractor_strength)?;
        ensure(self.force_period > 0, "force_period must be > 0")?;

        ensure(self.capacity > 0, "capacity must be > 0")?;
        ensure_non_negative("spawn_multiplier", self.spawn_multiplier)?;
        ensure_non_negative("chaos_floor", self.chaos_floor)?;
        ensure(
            self.chaos_max.is_finite() && self.chaos_max >= self.chaos_floor,
            format!(
                "chaos_max ({}) must be finite and >= chaos_floor ({})",
                self.chaos_max, self.chaos_floor
            ),
        )?;
        ensure(self.chaos_decay_interval > 0, "chaos_decay_interval must be > 0")?;
        ensure_non_negative("chaos_decay_rate", self.chaos_decay_rate)?;
        ensure(self.seed_count > 0, "seed_count must be > 0")?;
        ensure_non_negative("quark_bias", self.quark_bias)?;
        ensure_non_negative("spawn_margin", self.spawn_margin)?;
        ensure_non_negative("spawn_offset", self.spawn_offset)?;
        ensure_non_negative("spawn_speed", self.spawn_speed)?;

        ensure_non_negative("annihilation_probability", self.annihilation_probability)?;
        ensure_non_negative("pair_ejection_speed", self.pair_ejection_speed)?;
        ensure_non_negative("deuterium_speed_floor", self.deuterium_speed_floor)?;

        ensure(self.decay_period > 0, "decay_period must be > 0")?;
        for (name, probability) in self.decay.entries() {
            ensure_non_negative(&format!("decay.{name}"), probability)?;
        }
        ensure_non_negative("strange_to_up_fraction", self.strange_to_up_fraction)?;
        ensure_non_negative("decay_ejection_speed", self.decay_ejection_speed)?;

        ensure_positive("max_speed", self.max_speed)?;
        Ok(())
    }

    /// Reach of the hydrogen and deuterium-atom capture rules
    pub fn capture_distance(&self) -> f32 {
        self.nuclear_threshold + self.capture_margin
    }
}
