//! # Particle Simulation Engine
//!
//! Chaos-driven particle sandbox: logistic-map fluctuations collide and
//! transmute into quarks, baryons, leptons and atoms under simplified force
//! laws, and short-lived species decay through an injectable oracle.
//!
//! ```no_run
//! use particle_simulation::{SimConfig, Simulation};
//!
//! let mut sim = Simulation::with_uniform_oracle(SimConfig::default())?;
//! for _ in 0..600 {
//!     sim.step(None);
//! }
//! println!("{}", sim.stats());
//! # Ok::<(), particle_simulation::SimError>(())
//! ```

pub mod chaos;
pub mod config;
pub mod decay;
pub mod error;
pub mod events;
pub mod field;
pub mod oracle;
pub mod reactions;
pub mod simulation;
pub mod snapshot;
pub mod spawn;
pub mod stats;
pub mod store;

pub use chaos::{sample_branches, Branch};
pub use config::{DecayTable, SimConfig};
pub use decay::DecayScheduler;
pub use error::{SimError, SimResult};
pub use events::{EventKind, EventLog, ReactionSink, SimEvent};
pub use field::{ForceField, PointForce};
pub use oracle::{AmplitudeOracle, DecayOracle, Qubit, UniformOracle};
pub use reactions::{ReactionContext, ReactionEngine};
pub use simulation::Simulation;
pub use snapshot::{EntityKind, EntityView, Snapshot};
pub use spawn::SpawnController;
pub use stats::{Counters, Stats};
pub use store::{ChangeSet, EntityStore, ProductFactory};
