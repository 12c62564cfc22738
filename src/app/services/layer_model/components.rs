//! Soil name and compound code decomposition

use crate::app::models::Lithology;
use crate::constants::{
    COMPONENT_ORDER, MAIN_COMPONENT_LETTERS, MODIFIER_INCREMENTS, NOT_DESCRIBED_SOIL_NAME,
    SOIL_NAME_COMPONENTS,
};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::trace;

/// Main letter followed by up to three lowercase modifiers with optional intensity
static COMPOUND_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<main>[GKLSVZ])(?:(?P<second>[ghklsvz])(?P<second_n>\d)?)?(?:(?P<third>[ghklsvz])(?P<third_n>\d)?)?(?:(?P<fourth>[ghklsvz])(?P<fourth_n>\d)?)?",
    )
    .expect("compound soil code pattern is valid")
});

/// Components of a BRO geotechnical soil name
///
/// Zero fractions are omitted. An unknown name is entirely undefined.
pub fn soil_name_components(name: &str) -> BTreeMap<Lithology, f64> {
    let Some((_, fractions)) = SOIL_NAME_COMPONENTS.iter().find(|(known, _)| *known == name) else {
        trace!("Unknown soil name {:?}", name);
        return undefined();
    };

    COMPONENT_ORDER
        .iter()
        .zip(fractions)
        .filter(|(_, fraction)| **fraction > 0.0)
        .map(|(lithology, fraction)| (*lithology, *fraction))
        .collect()
}

/// Components of a GEF borehole soil code such as `Kz2s1`
///
/// The second, third and fourth letters add their intensity digit times a
/// fixed increment (a letter without digit counts once); the main letter
/// takes the remainder. Not-described codes are special material.
pub fn decode_compound_code(code: &str) -> BTreeMap<Lithology, f64> {
    if code.contains(NOT_DESCRIBED_SOIL_NAME) || code.contains('0') {
        return BTreeMap::from([(Lithology::Special, 1.0)]);
    }

    let Some(captures) = COMPOUND_CODE.captures(code) else {
        trace!("Unreadable soil code {:?}", code);
        return undefined();
    };

    let mut modifiers: Vec<(Lithology, f64)> = Vec::with_capacity(MODIFIER_INCREMENTS.len());
    for ((letter, intensity), increment) in [
        ("second", "second_n"),
        ("third", "third_n"),
        ("fourth", "fourth_n"),
    ]
    .into_iter()
    .zip(MODIFIER_INCREMENTS)
    {
        let Some(lithology) = captures
            .name(letter)
            .and_then(|m| m.as_str().chars().next())
            .and_then(|c| lithology_of(c.to_ascii_uppercase()))
        else {
            break;
        };
        let steps = captures
            .name(intensity)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(1);
        modifiers.push((lithology, f64::from(steps) * increment));
    }

    let main = captures
        .name("main")
        .and_then(|m| m.as_str().chars().next())
        .and_then(lithology_of)
        .unwrap_or(Lithology::Undefined);

    let modifier_total: f64 = modifiers.iter().map(|(_, fraction)| fraction).sum();
    let mut components = BTreeMap::new();
    if modifier_total < 1.0 {
        components.insert(main, 1.0 - modifier_total);
        for (lithology, fraction) in modifiers {
            *components.entry(lithology).or_insert(0.0) += fraction;
        }
    } else {
        // intensities overshooting the whole share it and leave the main letter out
        for (lithology, fraction) in modifiers {
            *components.entry(lithology).or_insert(0.0) += fraction / modifier_total;
        }
    }
    components
}

/// Sum of all fractions
pub fn component_sum(components: &BTreeMap<Lithology, f64>) -> f64 {
    components.values().sum()
}

fn lithology_of(letter: char) -> Option<Lithology> {
    MAIN_COMPONENT_LETTERS
        .iter()
        .find(|(known, _)| *known == letter)
        .map(|(_, lithology)| *lithology)
}

fn undefined() -> BTreeMap<Lithology, f64> {
    BTreeMap::from([(Lithology::Undefined, 1.0)])
}
