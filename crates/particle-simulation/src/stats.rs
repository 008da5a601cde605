//! Running totals and HUD statistics

use std::collections::BTreeMap;
use std::fmt;

use particle_physics::ParticleType;

/// Totals accumulated across ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub spawned_pairs: u64,
    /// Leptons and quarks materialised from fluctuations
    pub matter_created: u64,
    /// Nuclei, atoms and baryons assembled from smaller particles
    pub matter_stabilized: u64,
    pub reactions: u64,
    pub decays: u64,
    /// Oracle consultations made by the decay scheduler
    pub decay_checks: u64,
}

/// Point-in-time summary for a HUD
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub tick: u64,
    pub chaos_parameter: f32,
    pub fluctuations: usize,
    pub particle_counts: BTreeMap<ParticleType, usize>,
    pub counters: Counters,
}

impl Stats {
    pub fn count(&self, particle_type: ParticleType) -> usize {
        self.particle_counts
            .get(&particle_type)
            .copied()
            .unwrap_or(0)
    }

    pub fn particles(&self) -> usize {
        self.particle_counts.values().sum()
    }

    /// Stabilized matter as a percentage of created matter
    pub fn stabilization_ratio(&self) -> f32 {
        if self.counters.matter_created == 0 {
            return 0.0;
        }
        self.counters.matter_stabilized as f32 / self.counters.matter_created as f32 * 100.0
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {} | r={:.4} | fluctuations {} | particles {} | created {} | stabilized {} ({:.2}%)",
            self.tick,
            self.chaos_parameter,
            self.fluctuations,
            self.particles(),
            self.counters.matter_created,
            self.counters.matter_stabilized,
            self.stabilization_ratio(),
        )?;
        for (particle_type, count) in &self.particle_counts {
            write!(f, " | {}: {}", particle_type.name(), count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_zero_without_created_matter() {
        let stats = Stats {
            tick: 0,
            chaos_parameter: 4.0,
            fluctuations: 0,
            particle_counts: BTreeMap::new(),
            counters: Counters::default(),
        };
        assert_eq!(stats.stabilization_ratio(), 0.0);
        assert_eq!(stats.count(ParticleType::Proton), 0);
    }

    #[test]
    fn display_lists_species() {
        let mut particle_counts = BTreeMap::new();
        particle_counts.insert(ParticleType::Proton, 2);
        let stats = Stats {
            tick: 7,
            chaos_parameter: 3.9,
            fluctuations: 4,
            particle_counts,
            counters: Counters {
                matter_created: 4,
                matter_stabilized: 1,
                ..Counters::default()
            },
        };
        let line = stats.to_string();
        assert!(line.contains("tick 7"));
        assert!(line.contains("Proton: 2"));
        assert!(line.contains("25.00%"));
    }
}
