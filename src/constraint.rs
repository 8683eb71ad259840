//! Per-plant axis masks and the dripstone plateau rule.

use serde::{Deserialize, Serialize};

/// The 12-bit axis mask selecting all three nibbles.
pub const MASK_XYZ: u16 = 0xFFF;
/// The 12-bit axis mask selecting only the x/z nibbles.
pub const MASK_XZ: u16 = 0xF0F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowerKind {
    Dandelion,
    Poppy,
    BlueOrchid,
    Allium,
    AzureBluet,
    TulipRed,
    TulipOrange,
    TulipWhite,
    TulipPink,
    OxeyeDaisy,
    Cornflower,
    LilyOfTheValley,
    WitherRose,
    Torchflower,
    PinkPetals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootsKind {
    MangroveRoots,
    CrimsonRoots,
    WarpedRoots,
}

/// The closed catalog of plant kinds the solver understands.
///
/// Unknown kinds are not representable here; `spec.md` requires the
/// *model* to degrade gracefully for unknown kinds, which callers
/// implement by mapping unrecognized tokens to `PlantKind::Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantKind {
    // XYZ family: vertical offset participates.
    ShortGrass,
    Fern,
    ShortDryGrass,
    TallDryGrass,
    SmallDripleaf,
    // XZ family: vertical offset is ignored.
    TallGrassBottom,
    TallGrassTop,
    LargeFernBottom,
    LargeFernTop,
    Bamboo,
    SugarCane,
    Seagrass,
    TallSeagrassBottom,
    TallSeagrassTop,
    SmallDripleafTop,
    MangrovePropagule,
    Flower(FlowerKind),
    PointedDripstone,
    Roots(RootsKind),
    /// Any token the catalog does not recognize. Per `spec.md` §4.2 this
    /// still yields a total result (`mask = MASK_XYZ`, `drip = false`);
    /// callers may reject it upstream, the model itself never fails.
    Unknown,
}

impl PlantKind {
    /// The 12-bit axis mask this kind's samples compare against.
    pub fn mask(self) -> u16 {
        match self {
            PlantKind::ShortGrass
            | PlantKind::Fern
            | PlantKind::ShortDryGrass
            | PlantKind::TallDryGrass
            | PlantKind::SmallDripleaf => MASK_XYZ,
            PlantKind::Unknown => MASK_XYZ,
            _ => MASK_XZ,
        }
    }

    /// Whether this kind's x/z nibbles collapse into plateau classes.
    pub fn is_dripstone(self) -> bool {
        matches!(self, PlantKind::PointedDripstone)
    }
}
