//! Particle types and properties for the chaotic particle sandbox

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::constants::*;

/// Stable identity of a live entity, assigned by the entity store on insert.
///
/// `EntityId::UNASSIGNED` marks entities that have been constructed but not yet
/// committed to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EntityId(pub u64);

impl EntityId {
    pub const UNASSIGNED: EntityId = EntityId(0);
}

/// Color charge carried by a fluctuation
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCharge {
    Red = 0,
    Green = 1,
    Blue = 2,
    AntiRed = 3,
    AntiGreen = 4,
    AntiBlue = 5,
}

impl ColorCharge {
    pub const ALL: [ColorCharge; 6] = [
        ColorCharge::Red,
        ColorCharge::Green,
        ColorCharge::Blue,
        ColorCharge::AntiRed,
        ColorCharge::AntiGreen,
        ColorCharge::AntiBlue,
    ];

    /// Classify a chaotic-map value into a color state.
    ///
    /// The table is ordered over [0, 1]; anything at or above the last bound
    /// (including values slightly past 1.0) is Red.
    pub fn from_center_value(value: f32) -> Self {
        if value < 0.15 {
            ColorCharge::AntiRed
        } else if value < 0.30 {
            ColorCharge::AntiGreen
        } else if value < 0.45 {
            ColorCharge::AntiBlue
        } else if value < 0.60 {
            ColorCharge::Blue
        } else if value < 0.75 {
            ColorCharge::Green
        } else {
            ColorCharge::Red
        }
    }

    /// Paired anti-state (Red <-> AntiRed, Green <-> AntiGreen, Blue <-> AntiBlue)
    pub fn anti(self) -> Self {
        match self {
            ColorCharge::Red => ColorCharge::AntiRed,
            ColorCharge::Green => ColorCharge::AntiGreen,
            ColorCharge::Blue => ColorCharge::AntiBlue,
            ColorCharge::AntiRed => ColorCharge::Red,
            ColorCharge::AntiGreen => ColorCharge::Green,
            ColorCharge::AntiBlue => ColorCharge::Blue,
        }
    }

    pub fn is_anti(self) -> bool {
        matches!(
            self,
            ColorCharge::AntiRed | ColorCharge::AntiGreen | ColorCharge::AntiBlue
        )
    }

    /// Same base color, opposite matter flag
    pub fn annihilates_with(self, other: ColorCharge) -> bool {
        self.anti() == other
    }

    /// Quark produced when this state collides with `other`, in either order.
    pub fn quark_with(self, other: ColorCharge) -> Option<ParticleType> {
        use ColorCharge::*;
        match (self, other) {
            (Red, AntiGreen) | (AntiGreen, Red) => Some(ParticleType::QuarkUp),
            (Blue, AntiGreen) | (AntiGreen, Blue) => Some(ParticleType::QuarkDown),
            (Green, AntiBlue) | (AntiBlue, Green) => Some(ParticleType::QuarkStrange),
            _ => None,
        }
    }

    /// Whether this state appears on either side of a quark-forming pair.
    pub fn is_quark_convertible(self) -> bool {
        ColorCharge::ALL
            .iter()
            .any(|other| self.quark_with(*other).is_some())
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorCharge::Red => "Red",
            ColorCharge::Green => "Green",
            ColorCharge::Blue => "Blue",
            ColorCharge::AntiRed => "Antired",
            ColorCharge::AntiGreen => "Antigreen",
            ColorCharge::AntiBlue => "Antiblue",
        }
    }

    /// Display color from the Catppuccin Mocha palette. Anti-colors use the
    /// complementary hue (cyan, magenta, yellow).
    pub fn rgb(self) -> [u8; 3] {
        let colors = &catppuccin::PALETTE.mocha.colors;
        let color = match self {
            ColorCharge::Red => &colors.red,
            ColorCharge::Green => &colors.green,
            ColorCharge::Blue => &colors.blue,
            ColorCharge::AntiRed => &colors.teal,
            ColorCharge::AntiGreen => &colors.pink,
            ColorCharge::AntiBlue => &colors.yellow,
        };
        [color.rgb.r, color.rgb.g, color.rgb.b]
    }
}

/// Particle species
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParticleType {
    Proton = 0,
    Neutron = 1,
    Electron = 2,
    Positron = 3,
    Deuterium = 4,
    DeuteriumAtom = 5,
    HydrogenAtom = 6,
    Lambda = 7,
    QuarkUp = 8,
    QuarkDown = 9,
    QuarkStrange = 10,
    MuonMinus = 11,
    PionMinus = 12,
}

/// Fixed per-species attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleAttributes {
    /// Electric charge in thirds of the elementary charge
    pub charge_thirds: i8,
    pub mass: f32,
    pub radius: f32,
    pub is_long_lived: bool,
}

impl ParticleType {
    pub const ALL: [ParticleType; 13] = [
        ParticleType::Proton,
        ParticleType::Neutron,
        ParticleType::Electron,
        ParticleType::Positron,
        ParticleType::Deuterium,
        ParticleType::DeuteriumAtom,
        ParticleType::HydrogenAtom,
        ParticleType::Lambda,
        ParticleType::QuarkUp,
        ParticleType::QuarkDown,
        ParticleType::QuarkStrange,
        ParticleType::MuonMinus,
        ParticleType::PionMinus,
    ];

    /// Static attribute table
    pub const fn attributes(self) -> ParticleAttributes {
        const fn attrs(
            charge_thirds: i8,
            mass: f32,
            radius: f32,
            is_long_lived: bool,
        ) -> ParticleAttributes {
            ParticleAttributes {
                charge_thirds,
                mass,
                radius,
                is_long_lived,
            }
        }

        match self {
            ParticleType::Proton => attrs(3, PROTON_MASS, NUCLEON_SIZE, true),
            ParticleType::Neutron => attrs(0, NEUTRON_MASS, NUCLEON_SIZE, true),
            ParticleType::Electron => attrs(-3, ELECTRON_MASS, LEPTON_SIZE, true),
            ParticleType::Positron => attrs(3, ELECTRON_MASS, LEPTON_SIZE, true),
            ParticleType::Deuterium => attrs(3, DEUTERON_MASS, DEUTERON_SIZE, true),
            ParticleType::DeuteriumAtom => attrs(0, DEUTERON_MASS, DEUTERIUM_ATOM_SIZE, true),
            ParticleType::HydrogenAtom => attrs(0, HYDROGEN_MASS, HYDROGEN_SIZE, true),
            ParticleType::Lambda => attrs(0, LAMBDA_MASS, LAMBDA_SIZE, false),
            ParticleType::QuarkUp => attrs(2, QUARK_UP_MASS, QUARK_SIZE, true),
            ParticleType::QuarkDown => attrs(-1, QUARK_DOWN_MASS, QUARK_SIZE, true),
            ParticleType::QuarkStrange => attrs(-1, QUARK_STRANGE_MASS, QUARK_SIZE, false),
            ParticleType::MuonMinus => attrs(-3, MUON_MASS, LEPTON_SIZE, false),
            ParticleType::PionMinus => attrs(-3, PION_MASS, PION_SIZE, false),
        }
    }

    /// Electric charge in units of e
    pub fn charge(self) -> f32 {
        self.attributes().charge_thirds as f32 / 3.0
    }

    pub fn charge_thirds(self) -> i8 {
        self.attributes().charge_thirds
    }

    pub fn mass(self) -> f32 {
        self.attributes().mass
    }

    pub fn radius(self) -> f32 {
        self.attributes().radius
    }

    pub fn is_long_lived(self) -> bool {
        self.attributes().is_long_lived
    }

    pub fn is_charged(self) -> bool {
        self.charge_thirds() != 0
    }

    pub fn is_quark(self) -> bool {
        matches!(
            self,
            ParticleType::QuarkUp | ParticleType::QuarkDown | ParticleType::QuarkStrange
        )
    }

    /// Feels the short-range nuclear force
    pub fn is_nucleon(self) -> bool {
        matches!(self, ParticleType::Proton | ParticleType::Neutron)
    }

    /// Massive neutral or nucleon-bearing body that pulls on fluctuations
    pub fn is_gravity_source(self) -> bool {
        matches!(
            self,
            ParticleType::Proton
                | ParticleType::Neutron
                | ParticleType::Deuterium
                | ParticleType::DeuteriumAtom
                | ParticleType::HydrogenAtom
                | ParticleType::Lambda
        )
    }

    /// Species with a decay channel. The neutron is long-lived but still
    /// decays (rarely).
    pub fn has_decay_channel(self) -> bool {
        matches!(
            self,
            ParticleType::Neutron
                | ParticleType::QuarkStrange
                | ParticleType::Lambda
                | ParticleType::PionMinus
                | ParticleType::MuonMinus
        )
    }

    /// Baryon formed by an unordered quark triple, if any.
    pub fn baryon_from_quarks(quarks: [ParticleType; 3]) -> Option<ParticleType> {
        let mut sorted = quarks;
        sorted.sort();
        use ParticleType::*;
        match sorted {
            [QuarkUp, QuarkUp, QuarkDown] => Some(Proton),
            [QuarkUp, QuarkDown, QuarkDown] => Some(Neutron),
            [QuarkUp, QuarkDown, QuarkStrange] => Some(Lambda),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParticleType::Proton => "Proton",
            ParticleType::Neutron => "Neutron",
            ParticleType::Electron => "Electron",
            ParticleType::Positron => "Positron",
            ParticleType::Deuterium => "Deuterium",
            ParticleType::DeuteriumAtom => "Deuterium Atom",
            ParticleType::HydrogenAtom => "Hydrogen Atom",
            ParticleType::Lambda => "Lambda",
            ParticleType::QuarkUp => "Quark UP",
            ParticleType::QuarkDown => "Quark DOWN",
            ParticleType::QuarkStrange => "Quark STRANGE",
            ParticleType::MuonMinus => "Muon-",
            ParticleType::PionMinus => "Pion-",
        }
    }

    /// Display color from the Catppuccin Mocha palette
    pub fn rgb(self) -> [u8; 3] {
        let colors = &catppuccin::PALETTE.mocha.colors;
        let color = match self {
            ParticleType::Proton => &colors.yellow,
            ParticleType::Neutron => &colors.overlay2,
            ParticleType::Electron => &colors.green,
            ParticleType::Positron => &colors.peach,
            ParticleType::Deuterium => &colors.sapphire,
            ParticleType::DeuteriumAtom => &colors.lavender,
            ParticleType::HydrogenAtom => &colors.surface2,
            ParticleType::Lambda => &colors.mauve,
            ParticleType::QuarkUp => &colors.red,
            ParticleType::QuarkDown => &colors.blue,
            ParticleType::QuarkStrange => &colors.teal,
            ParticleType::MuonMinus => &colors.flamingo,
            ParticleType::PionMinus => &colors.maroon,
        };
        [color.rgb.r, color.rgb.g, color.rgb.b]
    }
}

/// Transient pre-matter wave
#[derive(Debug, Clone, PartialEq)]
pub struct Fluctuation {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    center_value: f32,
    state: ColorCharge,
    /// Visual distortion only; never affects reaction outcomes
    pub chaos_level: f32,
    pub color: [u8; 3],
}

impl Fluctuation {
    /// Create a fluctuation whose state is classified from `center_value`.
    pub fn new(position: Vec2, velocity: Vec2, center_value: f32, chaos_level: f32) -> Self {
        let state = ColorCharge::from_center_value(center_value);
        Self {
            id: EntityId::UNASSIGNED,
            position,
            velocity,
            center_value,
            state,
            chaos_level: chaos_level.clamp(0.0, 1.0),
            color: state.rgb(),
        }
    }

    /// Create a fluctuation carrying an explicit state. Used for the anti
    /// partner of a spawned pair, which shares the partner's center value.
    pub fn with_state(
        position: Vec2,
        velocity: Vec2,
        center_value: f32,
        chaos_level: f32,
        state: ColorCharge,
    ) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            position,
            velocity,
            center_value,
            state,
            chaos_level: chaos_level.clamp(0.0, 1.0),
            color: state.rgb(),
        }
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn center_value(&self) -> f32 {
        self.center_value
    }

    pub fn state(&self) -> ColorCharge {
        self.state
    }

    pub fn radius(&self) -> f32 {
        FLUCTUATION_RADIUS
    }
}

/// Typed matter
#[derive(Debug, Clone, PartialEq)]
pub struct StableParticle {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    particle_type: ParticleType,
    /// Ticks left in the post-creation window that blocks reactions
    pub invulnerable_ticks: u32,
    /// Ticks left before the decay scheduler starts offering this particle
    pub decay_countdown: u32,
}

impl StableParticle {
    pub fn new(particle_type: ParticleType, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            position,
            velocity,
            particle_type,
            invulnerable_ticks: 0,
            decay_countdown: 0,
        }
    }

    pub fn with_invulnerability(mut self, ticks: u32) -> Self {
        self.invulnerable_ticks = ticks;
        self
    }

    pub fn with_decay_countdown(mut self, ticks: u32) -> Self {
        self.decay_countdown = ticks;
        self
    }

    pub fn particle_type(&self) -> ParticleType {
        self.particle_type
    }

    pub fn charge(&self) -> f32 {
        self.particle_type.charge()
    }

    pub fn mass(&self) -> f32 {
        self.particle_type.mass()
    }

    pub fn radius(&self) -> f32 {
        self.particle_type.radius()
    }

    pub fn is_long_lived(&self) -> bool {
        self.particle_type.is_long_lived()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Offered to the decay oracle on a decay tick
    pub fn is_decay_eligible(&self) -> bool {
        self.particle_type.has_decay_channel() && self.decay_countdown == 0
    }

    /// Count down the invulnerability and decay timers by one tick
    pub fn tick_timers(&mut self) {
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
        self.decay_countdown = self.decay_countdown.saturating_sub(1);
    }
}

/// Offset added to a fluctuation's color index in [`ParticleInstance::kind`]
pub const FLUCTUATION_KIND_BASE: u32 = 0x100;

/// Instance flag: entity is in its post-creation window
pub const FLAG_INVULNERABLE: u32 = 1 << 0;
/// Instance flag: fluctuation carries an anti-color
pub const FLAG_ANTIMATTER: u32 = 1 << 1;

/// GPU-compatible instance record for one rendered entity
/// Aligned for WGSL struct compatibility (48 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub velocity: [f32; 2],

    /// RGBA in [0, 1]
    pub color: [f32; 4],

    pub radius: f32,
    /// `ParticleType as u32`, or `FLUCTUATION_KIND_BASE + ColorCharge as u32`
    pub kind: u32,
    pub flags: u32,
    pub chaos_level: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table_bounds() {
        assert_eq!(ColorCharge::from_center_value(0.0), ColorCharge::AntiRed);
        assert_eq!(ColorCharge::from_center_value(0.15), ColorCharge::AntiGreen);
        assert_eq!(ColorCharge::from_center_value(0.29), ColorCharge::AntiGreen);
        assert_eq!(ColorCharge::from_center_value(0.44), ColorCharge::AntiBlue);
        assert_eq!(ColorCharge::from_center_value(0.5), ColorCharge::Blue);
        assert_eq!(ColorCharge::from_center_value(0.7), ColorCharge::Green);
        assert_eq!(ColorCharge::from_center_value(0.75), ColorCharge::Red);
        assert_eq!(ColorCharge::from_center_value(1.0), ColorCharge::Red);
    }

    #[test]
    fn anti_pairing_is_an_involution() {
        for color in ColorCharge::ALL {
            assert_ne!(color.anti(), color);
            assert_eq!(color.anti().anti(), color);
            assert_ne!(color.is_anti(), color.anti().is_anti());
            assert!(color.annihilates_with(color.anti()));
        }
    }

    #[test]
    fn quark_rules_are_symmetric() {
        use ColorCharge::*;
        assert_eq!(Red.quark_with(AntiGreen), Some(ParticleType::QuarkUp));
        assert_eq!(AntiGreen.quark_with(Red), Some(ParticleType::QuarkUp));
        assert_eq!(AntiGreen.quark_with(Blue), Some(ParticleType::QuarkDown));
        assert_eq!(AntiBlue.quark_with(Green), Some(ParticleType::QuarkStrange));
        assert_eq!(Red.quark_with(AntiRed), None);
        assert!(!AntiRed.is_quark_convertible());
        assert!(Red.is_quark_convertible());
        assert!(AntiBlue.is_quark_convertible());
    }

    #[test]
    fn baryon_classification_ignores_order() {
        use ParticleType::*;
        assert_eq!(
            ParticleType::baryon_from_quarks([QuarkDown, QuarkUp, QuarkUp]),
            Some(Proton)
        );
        assert_eq!(
            ParticleType::baryon_from_quarks([QuarkDown, QuarkUp, QuarkDown]),
            Some(Neutron)
        );
        assert_eq!(
            ParticleType::baryon_from_quarks([QuarkStrange, QuarkDown, QuarkUp]),
            Some(Lambda)
        );
        assert_eq!(
            ParticleType::baryon_from_quarks([QuarkUp, QuarkUp, QuarkUp]),
            None
        );
    }

    #[test]
    fn baryon_charge_is_integral() {
        use ParticleType::*;
        let cases = [
            [QuarkUp, QuarkUp, QuarkDown],
            [QuarkUp, QuarkDown, QuarkDown],
            [QuarkUp, QuarkDown, QuarkStrange],
        ];
        for quarks in cases {
            let baryon = ParticleType::baryon_from_quarks(quarks).unwrap();
            let total: i8 = quarks.iter().map(|q| q.charge_thirds()).sum();
            assert_eq!(total, baryon.charge_thirds());
        }
    }

    #[test]
    fn timers_saturate_at_zero() {
        let mut p = StableParticle::new(ParticleType::PionMinus, Vec2::ZERO, Vec2::ZERO)
            .with_invulnerability(1)
            .with_decay_countdown(2);
        assert!(p.is_invulnerable());
        assert!(!p.is_decay_eligible());
        p.tick_timers();
        p.tick_timers();
        p.tick_timers();
        assert!(!p.is_invulnerable());
        assert!(p.is_decay_eligible());
        assert_eq!(p.invulnerable_ticks, 0);
    }

    #[test]
    fn instance_layout_matches_wgsl() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 48);
    }
}
