//! Live entity collections and deferred mutation
//!
//! Reaction and decay passes never touch the store while scanning it. They
//! mark consumed indices and queue new entities in a [`ChangeSet`], which the
//! store applies in one [`EntityStore::commit`] afterwards.

use glam::Vec2;
use particle_physics::{EntityId, Fluctuation, ParticleType, StableParticle};
use rand::Rng;

use crate::config::SimConfig;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    fluctuations: Vec<Fluctuation>,
    particles: Vec<StableParticle>,
    next_id: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            fluctuations: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        // Default-constructed stores start at 0, which is reserved.
        self.next_id = self.next_id.max(1);
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert_fluctuation(&mut self, mut fluctuation: Fluctuation) -> EntityId {
        let id = self.allocate_id();
        fluctuation.id = id;
        self.fluctuations.push(fluctuation);
        id
    }

    pub fn insert_particle(&mut self, mut particle: StableParticle) -> EntityId {
        let id = self.allocate_id();
        particle.id = id;
        self.particles.push(particle);
        id
    }

    pub fn fluctuations(&self) -> &[Fluctuation] {
        &self.fluctuations
    }

    pub fn particles(&self) -> &[StableParticle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [StableParticle] {
        &mut self.particles
    }

    /// Both collections at once, for passes that couple them.
    pub fn split_mut(&mut self) -> (&mut [Fluctuation], &mut [StableParticle]) {
        (&mut self.fluctuations, &mut self.particles)
    }

    /// Combined live entity count
    pub fn len(&self) -> usize {
        self.fluctuations.len() + self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_of(&self, particle_type: ParticleType) -> usize {
        self.particles
            .iter()
            .filter(|p| p.particle_type() == particle_type)
            .count()
    }

    /// Empty change set sized for the current collections
    pub fn change_set(&self) -> ChangeSet {
        ChangeSet {
            consumed_fluctuations: vec![false; self.fluctuations.len()],
            consumed_particles: vec![false; self.particles.len()],
            new_fluctuations: Vec::new(),
            new_particles: Vec::new(),
        }
    }

    /// Drop every consumed entity, then append the queued ones.
    ///
    /// Survivors keep their relative order and their ids.
    pub fn commit(&mut self, changes: ChangeSet) {
        let ChangeSet {
            consumed_fluctuations,
            consumed_particles,
            new_fluctuations,
            new_particles,
        } = changes;

        retain_unmarked(&mut self.fluctuations, &consumed_fluctuations);
        retain_unmarked(&mut self.particles, &consumed_particles);

        for fluctuation in new_fluctuations {
            self.insert_fluctuation(fluctuation);
        }
        for particle in new_particles {
            self.insert_particle(particle);
        }
    }
}

fn retain_unmarked<T>(items: &mut Vec<T>, consumed: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !consumed.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}

/// Consumption marks and queued creations for one pass
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    consumed_fluctuations: Vec<bool>,
    consumed_particles: Vec<bool>,
    new_fluctuations: Vec<Fluctuation>,
    new_particles: Vec<StableParticle>,
}

fn consume(marks: &mut [bool], indices: &[usize]) -> bool {
    let available = indices
        .iter()
        .enumerate()
        .all(|(n, &i)| marks.get(i) == Some(&false) && !indices[..n].contains(&i));
    if available {
        for &i in indices {
            marks[i] = true;
        }
    }
    available
}

impl ChangeSet {
    /// Mark all of `indices` consumed, or none of them if any is already
    /// taken, out of range or repeated. Returns whether the mark happened.
    pub fn consume_fluctuations(&mut self, indices: &[usize]) -> bool {
        consume(&mut self.consumed_fluctuations, indices)
    }

    /// Particle counterpart of [`ChangeSet::consume_fluctuations`]
    pub fn consume_particles(&mut self, indices: &[usize]) -> bool {
        consume(&mut self.consumed_particles, indices)
    }

    pub fn is_fluctuation_consumed(&self, index: usize) -> bool {
        self.consumed_fluctuations
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    pub fn is_particle_consumed(&self, index: usize) -> bool {
        self.consumed_particles.get(index).copied().unwrap_or(false)
    }

    pub fn add_fluctuation(&mut self, fluctuation: Fluctuation) {
        self.new_fluctuations.push(fluctuation);
    }

    pub fn add_particle(&mut self, particle: StableParticle) {
        self.new_particles.push(particle);
    }

    #[cfg(test)]
    fn consumed_count(&self) -> usize {
        self.consumed_fluctuations.iter().filter(|c| **c).count()
            + self.consumed_particles.iter().filter(|c| **c).count()
    }
}

/// Builds reaction and decay products with their starting timers.
#[derive(Debug, Clone, Copy)]
pub struct ProductFactory {
    pub invulnerability_ticks: u32,
    pub decay_delay_max: u32,
}

impl ProductFactory {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            invulnerability_ticks: config.invulnerability_ticks,
            decay_delay_max: config.decay_delay_max,
        }
    }

    pub fn make<R: Rng + ?Sized>(
        &self,
        particle_type: ParticleType,
        position: Vec2,
        velocity: Vec2,
        rng: &mut R,
    ) -> StableParticle {
        let particle = StableParticle::new(particle_type, position, velocity)
            .with_invulnerability(self.invulnerability_ticks);
        if particle_type.is_long_lived() || self.decay_delay_max == 0 {
            return particle;
        }
        let countdown = rng.random_range(self.decay_delay_max / 3..=self.decay_delay_max);
        particle.with_decay_countdown(countdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn proton(x: f32) -> StableParticle {
        StableParticle::new(ParticleType::Proton, Vec2::new(x, 0.0), Vec2::ZERO)
    }

    #[test]
    fn ids_are_unique_and_nonzero() {
        let mut store = EntityStore::new();
        let a = store.insert_particle(proton(0.0));
        let b = store.insert_fluctuation(Fluctuation::new(Vec2::ZERO, Vec2::ZERO, 0.5, 0.1));
        assert_ne!(a, EntityId::UNASSIGNED);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn default_store_skips_reserved_id() {
        let mut store = EntityStore::default();
        assert_eq!(store.insert_particle(proton(0.0)), EntityId(1));
    }

    #[test]
    fn consume_is_all_or_nothing() {
        let mut store = EntityStore::new();
        for x in 0..3 {
            store.insert_particle(proton(x as f32));
        }
        let mut changes = store.change_set();
        assert!(changes.consume_particles(&[0, 1]));
        assert!(!changes.consume_particles(&[1, 2]));
        assert!(!changes.is_particle_consumed(2));
        assert!(!changes.consume_particles(&[2, 2]));
        assert!(!changes.consume_particles(&[7]));
        assert!(changes.consume_particles(&[2]));
        assert_eq!(changes.consumed_count(), 3);
    }

    #[test]
    fn commit_removes_marked_and_appends_new() {
        let mut store = EntityStore::new();
        let keep = store.insert_particle(proton(0.0));
        store.insert_particle(proton(1.0));
        let mut changes = store.change_set();
        changes.consume_particles(&[1]);
        changes.add_particle(StableParticle::new(
            ParticleType::Neutron,
            Vec2::ZERO,
            Vec2::ZERO,
        ));
        store.commit(changes);

        assert_eq!(store.particles().len(), 2);
        assert_eq!(store.particles()[0].id, keep);
        assert_eq!(store.particles()[1].particle_type(), ParticleType::Neutron);
        assert!(store.particles()[1].id.0 > keep.0);
    }

    #[test]
    fn short_lived_products_get_a_countdown() {
        let factory = ProductFactory {
            invulnerability_ticks: 60,
            decay_delay_max: 300,
        };
        let mut rng = StdRng::seed_from_u64(9);
        let pion = factory.make(ParticleType::PionMinus, Vec2::ZERO, Vec2::ZERO, &mut rng);
        assert_eq!(pion.invulnerable_ticks, 60);
        assert!((100..=300).contains(&pion.decay_countdown));

        let proton = factory.make(ParticleType::Proton, Vec2::ZERO, Vec2::ZERO, &mut rng);
        assert_eq!(proton.decay_countdown, 0);
    }
}
