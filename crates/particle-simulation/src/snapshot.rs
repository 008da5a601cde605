//! Read-only views handed to rendering and HUD code

use glam::Vec2;
use particle_physics::{
    ColorCharge, EntityId, Fluctuation, ParticleInstance, ParticleType, StableParticle,
    FLAG_ANTIMATTER, FLAG_INVULNERABLE, FLUCTUATION_KIND_BASE,
};

use crate::store::EntityStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Fluctuation(ColorCharge),
    Particle(ParticleType),
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Fluctuation(state) => state.name(),
            EntityKind::Particle(kind) => kind.name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
    pub chaos_level: f32,
    pub invulnerable: bool,
}

impl From<&Fluctuation> for EntityView {
    fn from(f: &Fluctuation) -> Self {
        Self {
            id: f.id,
            kind: EntityKind::Fluctuation(f.state()),
            position: f.position,
            velocity: f.velocity,
            radius: f.radius(),
            color: f.color,
            chaos_level: f.chaos_level,
            invulnerable: false,
        }
    }
}

impl From<&StableParticle> for EntityView {
    fn from(p: &StableParticle) -> Self {
        let kind = p.particle_type();
        Self {
            id: p.id,
            kind: EntityKind::Particle(kind),
            position: p.position,
            velocity: p.velocity,
            radius: p.radius(),
            color: kind.rgb(),
            chaos_level: 0.0,
            invulnerable: p.is_invulnerable(),
        }
    }
}

impl EntityView {
    pub fn instance(&self) -> ParticleInstance {
        let [r, g, b] = self.color.map(|c| c as f32 / 255.0);
        let (kind, mut flags) = match self.kind {
            EntityKind::Fluctuation(state) => (
                FLUCTUATION_KIND_BASE + state as u32,
                if state.is_anti() { FLAG_ANTIMATTER } else { 0 },
            ),
            EntityKind::Particle(kind) => (kind as u32, 0),
        };
        if self.invulnerable {
            flags |= FLAG_INVULNERABLE;
        }
        ParticleInstance {
            position: self.position.to_array(),
            velocity: self.velocity.to_array(),
            color: [r, g, b, 1.0],
            radius: self.radius,
            kind,
            flags,
            chaos_level: self.chaos_level,
        }
    }
}

/// Frozen copy of the world after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub entities: Vec<EntityView>,
}

impl Snapshot {
    pub fn capture(tick: u64, store: &EntityStore) -> Self {
        let entities = store
            .fluctuations()
            .iter()
            .map(EntityView::from)
            .chain(store.particles().iter().map(EntityView::from))
            .collect();
        Self { tick, entities }
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityView> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn particles(&self) -> impl Iterator<Item = &EntityView> {
        self.entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Particle(_)))
    }

    pub fn fluctuations(&self) -> impl Iterator<Item = &EntityView> {
        self.entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Fluctuation(_)))
    }

    /// Instance records ready for a GPU instance buffer
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.entities.iter().map(EntityView::instance).collect()
    }

    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.instances()).to_vec()
    }
}
