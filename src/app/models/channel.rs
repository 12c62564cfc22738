//! Canonical measurement channels of a cone penetration test

use crate::constants::GEF_QUANTITY_CHANNELS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named measurement channel of a sounding
///
/// Both formats map their columns onto this closed set: GEF through the
/// quantity-number table, BRO XML through the fixed column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    PenetrationLength,
    Depth,
    ElapsedTime,
    ConeResistance,
    CorrectedConeResistance,
    NetConeResistance,
    MagneticFieldStrengthX,
    MagneticFieldStrengthY,
    MagneticFieldStrengthZ,
    MagneticFieldStrengthTotal,
    ElectricalConductivity,
    InclinationEW,
    InclinationNS,
    InclinationX,
    InclinationY,
    InclinationResultant,
    MagneticInclination,
    MagneticDeclination,
    LocalFriction,
    PoreRatio,
    Temperature,
    PorePressureU1,
    PorePressureU2,
    PorePressureU3,
    FrictionRatio,
    /// Net cone resistance ratio (Nm), GEF quantity 16
    NetConeResistanceRatio,
    UnitWeight,
    /// Hydrostatic pore pressure (u0)
    HydrostaticPressure,
    TotalVerticalStress,
    EffectiveVerticalStress,
}

impl Channel {
    /// Channels every normalized sample must carry
    pub const REQUIRED: [Channel; 4] = [
        Channel::Depth,
        Channel::ConeResistance,
        Channel::LocalFriction,
        Channel::FrictionRatio,
    ];

    /// Every channel, in canonical order
    pub const ALL: [Channel; 30] = [
        Channel::PenetrationLength,
        Channel::Depth,
        Channel::ElapsedTime,
        Channel::ConeResistance,
        Channel::CorrectedConeResistance,
        Channel::NetConeResistance,
        Channel::MagneticFieldStrengthX,
        Channel::MagneticFieldStrengthY,
        Channel::MagneticFieldStrengthZ,
        Channel::MagneticFieldStrengthTotal,
        Channel::ElectricalConductivity,
        Channel::InclinationEW,
        Channel::InclinationNS,
        Channel::InclinationX,
        Channel::InclinationY,
        Channel::InclinationResultant,
        Channel::MagneticInclination,
        Channel::MagneticDeclination,
        Channel::LocalFriction,
        Channel::PoreRatio,
        Channel::Temperature,
        Channel::PorePressureU1,
        Channel::PorePressureU2,
        Channel::PorePressureU3,
        Channel::FrictionRatio,
        Channel::NetConeResistanceRatio,
        Channel::UnitWeight,
        Channel::HydrostaticPressure,
        Channel::TotalVerticalStress,
        Channel::EffectiveVerticalStress,
    ];

    /// Canonical camelCase name, as used by BRO
    pub fn name(&self) -> &'static str {
        match self {
            Channel::PenetrationLength => "penetrationLength",
            Channel::Depth => "depth",
            Channel::ElapsedTime => "elapsedTime",
            Channel::ConeResistance => "coneResistance",
            Channel::CorrectedConeResistance => "correctedConeResistance",
            Channel::NetConeResistance => "netConeResistance",
            Channel::MagneticFieldStrengthX => "magneticFieldStrengthX",
            Channel::MagneticFieldStrengthY => "magneticFieldStrengthY",
            Channel::MagneticFieldStrengthZ => "magneticFieldStrengthZ",
            Channel::MagneticFieldStrengthTotal => "magneticFieldStrengthTotal",
            Channel::ElectricalConductivity => "electricalConductivity",
            Channel::InclinationEW => "inclinationEW",
            Channel::InclinationNS => "inclinationNS",
            Channel::InclinationX => "inclinationX",
            Channel::InclinationY => "inclinationY",
            Channel::InclinationResultant => "inclinationResultant",
            Channel::MagneticInclination => "magneticInclination",
            Channel::MagneticDeclination => "magneticDeclination",
            Channel::LocalFriction => "localFriction",
            Channel::PoreRatio => "poreRatio",
            Channel::Temperature => "temperature",
            Channel::PorePressureU1 => "porePressureU1",
            Channel::PorePressureU2 => "porePressureU2",
            Channel::PorePressureU3 => "porePressureU3",
            Channel::FrictionRatio => "frictionRatio",
            Channel::NetConeResistanceRatio => "netConeResistanceRatio",
            Channel::UnitWeight => "unitWeight",
            Channel::HydrostaticPressure => "hydrostaticPressure",
            Channel::TotalVerticalStress => "totalVerticalStress",
            Channel::EffectiveVerticalStress => "effectiveVerticalStress",
        }
    }

    /// Look up the channel for a GEF quantity number
    pub fn from_quantity_number(quantity: u32) -> Option<Self> {
        GEF_QUANTITY_CHANNELS
            .iter()
            .find(|(number, _)| *number == quantity)
            .map(|(_, channel)| *channel)
    }

    /// GEF quantity number of this channel, if GEF can carry it
    pub fn quantity_number(&self) -> Option<u32> {
        GEF_QUANTITY_CHANNELS
            .iter()
            .find(|(_, channel)| channel == self)
            .map(|(number, _)| *number)
    }

    /// Whether normalization requires this channel
    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|channel| channel.name() == s)
            .copied()
            .ok_or_else(|| format!("Unknown channel: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_quantity_table_is_one_to_one() {
        let numbers: HashSet<u32> = GEF_QUANTITY_CHANNELS.iter().map(|(n, _)| *n).collect();
        let channels: HashSet<Channel> = GEF_QUANTITY_CHANNELS.iter().map(|(_, c)| *c).collect();

        assert_eq!(numbers.len(), GEF_QUANTITY_CHANNELS.len());
        assert_eq!(channels.len(), GEF_QUANTITY_CHANNELS.len());
        assert!((1..=22).all(|n| numbers.contains(&n)));
    }

    #[test]
    fn test_quantity_lookup() {
        assert_eq!(
            Channel::from_quantity_number(1),
            Some(Channel::PenetrationLength)
        );
        assert_eq!(Channel::from_quantity_number(11), Some(Channel::Depth));
        assert_eq!(
            Channel::from_quantity_number(16),
            Some(Channel::NetConeResistanceRatio)
        );
        assert_eq!(Channel::from_quantity_number(23), None);
        assert_eq!(Channel::from_quantity_number(0), None);

        assert_eq!(Channel::FrictionRatio.quantity_number(), Some(4));
        assert_eq!(Channel::Temperature.quantity_number(), None);
    }

    #[test]
    fn test_names_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(channel.name().parse::<Channel>(), Ok(channel));
        }
        assert!("coneresistance".parse::<Channel>().is_err());
    }

    #[test]
    fn test_required_channels() {
        assert!(Channel::Depth.is_required());
        assert!(Channel::FrictionRatio.is_required());
        assert!(!Channel::PenetrationLength.is_required());
    }
}
