//! Rock taxonomy and crust columns.
//!
//! A [`Chunk`] is one column of crust, a stack of [`Layer`]s sitting on the
//! mantle. Rock types carry the physical data the simulation needs (density
//! for isostasy) plus the transition tables the rock cycle is built from.

use crate::constants::CHUNK_WIDTH_KM;
use crate::geometry::Length;
use rand::Rng;

/// Broad family a rock type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RockClass {
    Sediment,
    Sedimentary,
    Metamorphic,
    Igneous,
    Magma,
}

/// Concrete rock types, with per-type physical data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RockType {
    // Magma
    Felsic,
    Mafic,
    // Igneous
    Rhyolite,
    Granite,
    Basalt,
    Gabbro,
    // Metamorphic
    Gneiss,
    Schist,
    Slate,
    Quartzite,
    Metaconglomerate,
    // Sedimentary
    Shale,
    Sandstone,
    Conglomerate,
    // Sediment
    Gravel,
    Sand,
    Clay,
}

impl RockType {
    pub const ALL: [RockType; 17] = [
        RockType::Felsic,
        RockType::Mafic,
        RockType::Rhyolite,
        RockType::Granite,
        RockType::Basalt,
        RockType::Gabbro,
        RockType::Gneiss,
        RockType::Schist,
        RockType::Slate,
        RockType::Quartzite,
        RockType::Metaconglomerate,
        RockType::Shale,
        RockType::Sandstone,
        RockType::Conglomerate,
        RockType::Gravel,
        RockType::Sand,
        RockType::Clay,
    ];

    /// Density in kg/m^3.
    pub fn density(&self) -> f32 {
        match self {
            RockType::Felsic => 2400.0,
            RockType::Mafic => 2700.0,
            RockType::Rhyolite => 2500.0,
            RockType::Granite => 2650.0,
            RockType::Basalt => 3000.0,
            RockType::Gabbro => 3100.0,
            RockType::Gneiss => 2800.0,
            RockType::Schist => 2900.0,
            RockType::Slate => 2800.0,
            RockType::Quartzite => 2700.0,
            RockType::Metaconglomerate => 2700.0,
            RockType::Shale => 2300.0,
            RockType::Sandstone => 2400.0,
            RockType::Conglomerate => 2400.0,
            RockType::Gravel => 1400.0,
            RockType::Sand => 1500.0,
            RockType::Clay => 1600.0,
        }
    }

    /// Pressure the rock withstands before changing, in kg/m^2.
    /// Magma and metamorphic rock never change under pressure alone.
    pub fn max_pressure(&self) -> f32 {
        match self.class() {
            RockClass::Magma | RockClass::Metamorphic => f32::INFINITY,
            _ => 0.0,
        }
    }

    /// Display color as an RGB triple.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            RockType::Felsic => (255, 128, 0),
            RockType::Mafic => (255, 150, 0),
            RockType::Rhyolite => (250, 210, 160),
            RockType::Granite => (250, 175, 125),
            RockType::Basalt => (50, 50, 50),
            RockType::Gabbro => (50, 60, 40),
            RockType::Gneiss => (200, 170, 140),
            RockType::Schist => (120, 130, 130),
            RockType::Slate => (60, 60, 50),
            RockType::Quartzite => (255, 140, 100),
            RockType::Metaconglomerate => (130, 115, 80),
            RockType::Shale => (70, 70, 60),
            RockType::Sandstone => (240, 180, 100),
            RockType::Conglomerate => (175, 160, 125),
            RockType::Gravel => (115, 110, 100),
            RockType::Sand => (230, 200, 130),
            RockType::Clay => (200, 100, 50),
        }
    }

    pub fn class(&self) -> RockClass {
        match self {
            RockType::Felsic | RockType::Mafic => RockClass::Magma,
            RockType::Rhyolite | RockType::Granite | RockType::Basalt | RockType::Gabbro => {
                RockClass::Igneous
            }
            RockType::Gneiss
            | RockType::Schist
            | RockType::Slate
            | RockType::Quartzite
            | RockType::Metaconglomerate => RockClass::Metamorphic,
            RockType::Shale | RockType::Sandstone | RockType::Conglomerate => {
                RockClass::Sedimentary
            }
            RockType::Gravel | RockType::Sand | RockType::Clay => RockClass::Sediment,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> RockType {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// The magma produced when this rock melts.
    pub fn melt(&self) -> RockType {
        match self {
            RockType::Gabbro | RockType::Basalt | RockType::Schist => RockType::Mafic,
            _ => RockType::Felsic,
        }
    }

    /// The products this rock sheds when eroded. Magma erodes to nothing;
    /// sand sheds clay along with itself.
    pub fn erode(&self) -> Vec<RockType> {
        match self {
            RockType::Mafic | RockType::Felsic => vec![],
            RockType::Gravel => vec![RockType::Gravel, RockType::Sand],
            RockType::Sand => vec![RockType::Sand, RockType::Clay],
            RockType::Clay => vec![RockType::Clay],
            _ => vec![RockType::Gravel],
        }
    }

    /// The metamorphic product of this rock, or `None` for magma (which has
    /// no solid structure to transform). Metamorphic rock maps to itself.
    pub fn transform(&self) -> Option<RockType> {
        match self {
            RockType::Felsic | RockType::Mafic => None,
            RockType::Rhyolite | RockType::Granite => Some(RockType::Gneiss),
            RockType::Gabbro | RockType::Basalt => Some(RockType::Schist),
            RockType::Shale => Some(RockType::Slate),
            RockType::Sandstone => Some(RockType::Quartzite),
            RockType::Conglomerate => Some(RockType::Metaconglomerate),
            RockType::Clay => Some(RockType::Shale),
            RockType::Sand => Some(RockType::Sandstone),
            RockType::Gravel => Some(RockType::Conglomerate),
            _ => Some(*self),
        }
    }
}

/// One horizontal band of rock inside a chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub rock: RockType,
    pub thickness: Length,
}

impl Layer {
    pub fn new(rock: RockType, thickness: Length) -> Self {
        Self { rock, thickness }
    }
}

/// One column of crust: a bottom-to-top stack of layers over a square
/// footprint of `CHUNK_WIDTH_KM` per side. A chunk always has at least one
/// layer; an empty column is the absence of a chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    layers: Vec<Layer>,
}

impl Chunk {
    pub fn new(first: Layer) -> Self {
        Self { layers: vec![first] }
    }

    /// Lay a new layer on top of the column.
    pub fn deposit(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn top_rock(&self) -> RockType {
        self.layers[self.layers.len() - 1].rock
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn thickness(&self) -> Length {
        let mut total = Length::ZERO;
        for layer in &self.layers {
            total += layer.thickness;
        }
        total
    }

    fn footprint_m2() -> f32 {
        let side = Length::from_kilometers(CHUNK_WIDTH_KM).meters();
        side * side
    }

    /// Total mass of the column in kg.
    pub fn mass(&self) -> f32 {
        self.layers
            .iter()
            .map(|l| l.rock.density() * l.thickness.meters() * Self::footprint_m2())
            .sum()
    }

    /// Mean density of the column in kg/m^3.
    pub fn density(&self) -> f32 {
        self.mass() / (self.thickness().meters() * Self::footprint_m2())
    }

    /// How far the column sinks below the mantle surface when floating
    /// isostatically.
    pub fn depth_sunk(&self, mantle_density: f32) -> Length {
        Length::from_meters(self.thickness().meters() * self.density() / mantle_density)
    }
}
