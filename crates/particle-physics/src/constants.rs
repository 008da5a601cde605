//! Physical constants for the sandbox
//!
//! These are simplified constants scaled for real-time visualization in a
//! pixel-sized 2D world. Forces act directly on velocity per tick, so the
//! values are tuned by eye rather than derived from SI units.

/// Coulomb-like coupling for electromagnetic velocity deltas
pub const EM_CONSTANT: f32 = 50.0;

/// Gravitational coupling between neutral bodies
pub const GRAVITY_CONSTANT: f32 = 1.0;

/// Distance below which the nuclear force and nucleon fusion apply
pub const NUCLEAR_THRESHOLD: f32 = 20.0;

/// Nuclear coupling (negative pulls nucleons together)
pub const NUCLEAR_CONSTANT: f32 = -20.0;

/// Extra reach added to the nuclear threshold for electron capture
pub const CAPTURE_MARGIN: f32 = 10.0;

/// Floor applied to every force-law denominator to prevent singularities
pub const MIN_FORCE_DISTANCE: f32 = 5.0;

/// Neutral pairs closer than this feel no mutual gravity
pub const GRAVITY_MIN_DISTANCE: f32 = 25.0;

/// Fluctuation size (collision radius)
pub const FLUCTUATION_RADIUS: f32 = 10.0;

// Visual event counts emitted per resolution
pub const ANNIHILATION_SPARKS: u32 = 30;
pub const QUARK_SPARKS: u32 = 15;
pub const FUSION_SPARKS: u32 = 20;
pub const PAIR_ANNIHILATION_PHOTONS: u32 = 5;
pub const DECAY_PHOTONS: u32 = 1;
pub const MUON_DECAY_SPARKS: u32 = 8;

// Masses in simulation units (1.0 ~ 1000 MeV)
pub const PROTON_MASS: f32 = 0.938;
pub const NEUTRON_MASS: f32 = 0.940;
pub const ELECTRON_MASS: f32 = 0.000511;
pub const DEUTERON_MASS: f32 = 1.876;
pub const HYDROGEN_MASS: f32 = 0.939;
pub const LAMBDA_MASS: f32 = 1.116;
pub const QUARK_UP_MASS: f32 = 0.0023;
pub const QUARK_DOWN_MASS: f32 = 0.0048;
pub const QUARK_STRANGE_MASS: f32 = 0.095;
pub const MUON_MASS: f32 = 0.1057;
pub const PION_MASS: f32 = 0.1396;

// Particle sizes (scaled for visibility)
pub const NUCLEON_SIZE: f32 = 8.0;
pub const LEPTON_SIZE: f32 = 5.0;
pub const QUARK_SIZE: f32 = 5.0;
pub const PION_SIZE: f32 = 6.0;
pub const LAMBDA_SIZE: f32 = 9.0;
pub const HYDROGEN_SIZE: f32 = 12.0;
pub const DEUTERON_SIZE: f32 = 15.0;
pub const DEUTERIUM_ATOM_SIZE: f32 = 20.0;
