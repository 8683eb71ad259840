//! The persisted text format: one placement per line, round-trippable
//! with [`SampleSet`](crate::sample::SampleSet) — `spec.md` §6.
//!
//! Parsing follows the teacher's `TryFrom<&str>` convention
//! (`src/gameplay/abstraction.rs`) rather than a parser-combinator
//! crate: split, `.get()`, `ok_or_else`, one `anyhow`-free error per
//! failure.

use crate::constraint::{FlowerKind, PlantKind, RootsKind};
use crate::error::SolverError;
use crate::sample::{BlockPos, Placement};

/// Canonical uppercase tag for a `PlantKind`, plus its variant token
/// when the kind carries one.
fn canonical(kind: PlantKind) -> (&'static str, Option<&'static str>) {
    match kind {
        PlantKind::ShortGrass => ("SHORT_GRASS", None),
        PlantKind::Fern => ("FERN", None),
        PlantKind::ShortDryGrass => ("SHORT_DRY_GRASS", None),
        PlantKind::TallDryGrass => ("TALL_DRY_GRASS", None),
        PlantKind::SmallDripleaf => ("SMALL_DRIPLEAF", None),
        PlantKind::TallGrassBottom => ("TALL_GRASS_BOTTOM", None),
        PlantKind::TallGrassTop => ("TALL_GRASS_TOP", None),
        PlantKind::LargeFernBottom => ("LARGE_FERN_BOTTOM", None),
        PlantKind::LargeFernTop => ("LARGE_FERN_TOP", None),
        PlantKind::Bamboo => ("BAMBOO", None),
        PlantKind::SugarCane => ("SUGAR_CANE", None),
        PlantKind::Seagrass => ("SEAGRASS", None),
        PlantKind::TallSeagrassBottom => ("TALL_SEAGRASS_BOTTOM", None),
        PlantKind::TallSeagrassTop => ("TALL_SEAGRASS_TOP", None),
        PlantKind::SmallDripleafTop => ("SMALL_DRIPLEAF_TOP", None),
        PlantKind::MangrovePropagule => ("MANGROVE_PROPAGULE", None),
        PlantKind::PointedDripstone => ("POINTED_DRIPSTONE", None),
        PlantKind::Unknown => ("UNKNOWN", None),
        PlantKind::Flower(f) => (
            "FLOWER",
            Some(match f {
                FlowerKind::Dandelion => "DANDELION",
                FlowerKind::Poppy => "POPPY",
                FlowerKind::BlueOrchid => "BLUE_ORCHID",
                FlowerKind::Allium => "ALLIUM",
                FlowerKind::AzureBluet => "AZURE_BLUET",
                FlowerKind::TulipRed => "TULIP_RED",
                FlowerKind::TulipOrange => "TULIP_ORANGE",
                FlowerKind::TulipWhite => "TULIP_WHITE",
                FlowerKind::TulipPink => "TULIP_PINK",
                FlowerKind::OxeyeDaisy => "OXEYE_DAISY",
                FlowerKind::Cornflower => "CORNFLOWER",
                FlowerKind::LilyOfTheValley => "LILY_OF_THE_VALLEY",
                FlowerKind::WitherRose => "WITHER_ROSE",
                FlowerKind::Torchflower => "TORCHFLOWER",
                FlowerKind::PinkPetals => "PINK_PETALS",
            }),
        ),
        PlantKind::Roots(r) => (
            "ROOTS",
            Some(match r {
                RootsKind::MangroveRoots => "MANGROVE",
                RootsKind::CrimsonRoots => "CRIMSON",
                RootsKind::WarpedRoots => "WARPED",
            }),
        ),
    }
}

/// Legacy tags kept for files written by older host versions. Maps to
/// the canonical tag only; ambiguous legacy names pick the more common
/// historical meaning (`TALL_GRASS` predates the top/bottom split).
fn resolve_legacy(tag: &str) -> &str {
    match tag {
        "GRASS" => "SHORT_GRASS",
        "TALL_GRASS" => "TALL_GRASS_BOTTOM",
        "DOUBLE_FERN" => "LARGE_FERN_BOTTOM",
        "LARGE_FERN" => "LARGE_FERN_BOTTOM",
        "REEDS" => "SUGAR_CANE",
        "DRIPLEAF" => "SMALL_DRIPLEAF",
        "DRIPSTONE" => "POINTED_DRIPSTONE",
        "PROPAGULE" => "MANGROVE_PROPAGULE",
        "TALL_SEAGRASS" => "TALL_SEAGRASS_BOTTOM",
        other => other,
    }
}

pub(crate) fn parse_kind(tag: &str, variant: Option<&str>) -> PlantKind {
    match resolve_legacy(tag) {
        "SHORT_GRASS" => PlantKind::ShortGrass,
        "FERN" => PlantKind::Fern,
        "SHORT_DRY_GRASS" => PlantKind::ShortDryGrass,
        "TALL_DRY_GRASS" => PlantKind::TallDryGrass,
        "SMALL_DRIPLEAF" => PlantKind::SmallDripleaf,
        "TALL_GRASS_BOTTOM" => PlantKind::TallGrassBottom,
        "TALL_GRASS_TOP" => PlantKind::TallGrassTop,
        "LARGE_FERN_BOTTOM" => PlantKind::LargeFernBottom,
        "LARGE_FERN_TOP" => PlantKind::LargeFernTop,
        "BAMBOO" => PlantKind::Bamboo,
        "SUGAR_CANE" => PlantKind::SugarCane,
        "SEAGRASS" => PlantKind::Seagrass,
        "TALL_SEAGRASS_BOTTOM" => PlantKind::TallSeagrassBottom,
        "TALL_SEAGRASS_TOP" => PlantKind::TallSeagrassTop,
        "SMALL_DRIPLEAF_TOP" => PlantKind::SmallDripleafTop,
        "MANGROVE_PROPAGULE" => PlantKind::MangrovePropagule,
        "POINTED_DRIPSTONE" => PlantKind::PointedDripstone,
        "FLOWER" => PlantKind::Flower(match variant.unwrap_or("") {
            "POPPY" => FlowerKind::Poppy,
            "BLUE_ORCHID" => FlowerKind::BlueOrchid,
            "ALLIUM" => FlowerKind::Allium,
            "AZURE_BLUET" => FlowerKind::AzureBluet,
            "TULIP_RED" => FlowerKind::TulipRed,
            "TULIP_ORANGE" => FlowerKind::TulipOrange,
            "TULIP_WHITE" => FlowerKind::TulipWhite,
            "TULIP_PINK" => FlowerKind::TulipPink,
            "OXEYE_DAISY" => FlowerKind::OxeyeDaisy,
            "CORNFLOWER" => FlowerKind::Cornflower,
            "LILY_OF_THE_VALLEY" => FlowerKind::LilyOfTheValley,
            "WITHER_ROSE" => FlowerKind::WitherRose,
            "TORCHFLOWER" => FlowerKind::Torchflower,
            "PINK_PETALS" => FlowerKind::PinkPetals,
            _ => FlowerKind::Dandelion,
        }),
        "ROOTS" => PlantKind::Roots(match variant.unwrap_or("") {
            "CRIMSON" => RootsKind::CrimsonRoots,
            "WARPED" => RootsKind::WarpedRoots,
            _ => RootsKind::MangroveRoots,
        }),
        _ => PlantKind::Unknown,
    }
}

/// Strips a trailing `# ...` or `// ...` comment, keeping whichever
/// marker appears first.
fn strip_comment(line: &str) -> &str {
    let hash = line.find('#');
    let slashes = line.find("//");
    match (hash, slashes) {
        (Some(h), Some(s)) => &line[..h.min(s)],
        (Some(h), None) => &line[..h],
        (None, Some(s)) => &line[..s],
        (None, None) => line,
    }
}

/// Parses one non-empty, comment-stripped line into a `Placement`.
pub fn parse_line(line: &str) -> Result<Option<Placement>, SolverError> {
    let line = strip_comment(line).trim();
    if line.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 7 {
        return Err(SolverError::InvalidParameter(format!(
            "expected at least 7 fields, got {}: {line:?}",
            fields.len()
        )));
    }

    let mut ints = [0i32; 6];
    for (i, slot) in ints.iter_mut().enumerate() {
        *slot = fields[i].parse::<i32>().map_err(|e| {
            SolverError::InvalidParameter(format!("field {i} ({:?}): {e}", fields[i]))
        })?;
    }
    let [bx, by, bz, ox, oy, oz] = ints;

    for (name, n) in [("ox", ox), ("oy", oy), ("oz", oz)] {
        if !(0..=15).contains(&n) {
            return Err(SolverError::InvalidParameter(format!(
                "{name} {n} outside [0, 15]"
            )));
        }
    }

    let tag = fields[6];
    let variant = fields.get(7).copied();
    let kind = parse_kind(tag, variant);

    Ok(Some(Placement::new(
        BlockPos::new(bx, by, bz),
        kind,
        ox as u8,
        oy as u8,
        oz as u8,
    )))
}

/// Parses every non-empty line of a persisted placement file.
pub fn parse(text: &str) -> Result<Vec<Placement>, SolverError> {
    text.lines().filter_map(|l| parse_line(l).transpose()).collect()
}

/// Renders one placement as a persisted line. For the XZ family, `oy`
/// is written as `15` per `spec.md` §6, since it is ignored on load.
pub fn write_line(p: &Placement) -> String {
    let (tag, variant) = canonical(p.kind);
    let oy = if p.kind.mask() == crate::constraint::MASK_XZ { 15 } else { p.off_y };
    let mut line = format!(
        "{} {} {} {} {} {} {}",
        p.pos.x, p.pos.y, p.pos.z, p.off_x, oy, p.off_z, tag
    );
    if let Some(v) = variant {
        line.push(' ');
        line.push_str(v);
    }
    line
}

pub fn write(placements: &[Placement]) -> String {
    placements.iter().map(write_line).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::MASK_XZ;

    #[test]
    fn strips_hash_and_slash_comments() {
        assert_eq!(strip_comment("1 2 3 # a comment"), "1 2 3 ");
        assert_eq!(strip_comment("1 2 3 // a comment"), "1 2 3 ");
        assert_eq!(strip_comment("1 2 3"), "1 2 3");
    }

    #[test]
    fn blank_and_comment_only_lines_parse_to_none() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # just a note").unwrap(), None);
    }

    #[test]
    fn parses_a_basic_short_grass_line() {
        let p = parse_line("100 64 200 7 15 7 SHORT_GRASS").unwrap().unwrap();
        assert_eq!(p.pos, BlockPos::new(100, 64, 200));
        assert_eq!((p.off_x, p.off_y, p.off_z), (7, 15, 7));
        assert_eq!(p.kind, PlantKind::ShortGrass);
    }

    #[test]
    fn legacy_alias_resolves_to_canonical_kind() {
        let p = parse_line("0 0 0 0 15 0 TALL_GRASS").unwrap().unwrap();
        assert_eq!(p.kind, PlantKind::TallGrassBottom);
    }

    #[test]
    fn variant_token_round_trips_for_flowers() {
        let p = parse_line("1 2 3 0 15 0 FLOWER POPPY").unwrap().unwrap();
        assert_eq!(p.kind, PlantKind::Flower(FlowerKind::Poppy));
        let line = write_line(&p);
        assert!(line.ends_with("FLOWER POPPY"));
    }

    #[test]
    fn nibble_out_of_range_is_rejected() {
        assert!(parse_line("0 0 0 16 0 0 SHORT_GRASS").is_err());
    }

    #[test]
    fn xz_family_always_exports_oy_as_15() {
        let p = Placement::new(BlockPos::new(0, 0, 0), PlantKind::Bamboo, 3, 9, 5);
        assert_eq!(p.kind.mask(), MASK_XZ);
        let line = write_line(&p);
        let fields: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(fields[4], "15");
    }

    #[test]
    fn round_trip_preserves_placements_ignoring_variant_token() {
        let placements = vec![
            Placement::new(BlockPos::new(100, 64, 200), PlantKind::ShortGrass, 7, 15, 7),
            Placement::new(BlockPos::new(103, 64, 205), PlantKind::Flower(FlowerKind::Poppy), 1, 15, 9),
            Placement::new(BlockPos::new(5, 5, 5), PlantKind::PointedDripstone, 0, 15, 15),
        ];
        let text = write(&placements);
        let parsed = parse(&text).unwrap();
        assert_eq!(parsed.len(), placements.len());
        for (original, reparsed) in placements.iter().zip(parsed.iter()) {
            assert_eq!(original.pos, reparsed.pos);
            assert_eq!(original.kind, reparsed.kind);
            assert_eq!(original.off_x, reparsed.off_x);
            assert_eq!(original.off_z, reparsed.off_z);
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_unknown_kind() {
        let p = parse_line("0 0 0 0 0 0 SOME_FUTURE_BLOCK").unwrap().unwrap();
        assert_eq!(p.kind, PlantKind::Unknown);
    }
}
