//! # Particle Physics
//!
//! Species, color charges and simplified force laws for the chaotic particle
//! sandbox: fluctuations carrying color states, typed stable particles with a
//! static attribute table, and the electromagnetic, nuclear and gravitational
//! velocity-delta laws.

pub mod constants;
pub mod forces;
pub mod particle;

pub use constants::*;
pub use forces::*;
pub use particle::*;
