//! Application constants for the GEF/XML processor
//!
//! This module contains the fixed lookup tables of the geotechnical formats
//! and the historical classification rule tables. Everything here is
//! immutable and shared by every parse.

use crate::app::models::{Channel, Lithology};
use crate::app::services::soil_classifier::rules::{
    Bound, BoundaryLine, RobertsonZone, ThresholdRule,
};

// =============================================================================
// GEF Format
// =============================================================================

/// End-of-header record key
pub const GEF_END_OF_HEADER: &str = "EOH";

/// Column separator used when `#COLUMNSEPARATOR` is absent (any whitespace)
pub const GEF_DEFAULT_COLUMN_SEPARATOR: &str = " ";

/// GEF-CPT quantity numbers and the canonical channel each one carries
///
/// Numbers are standardised even though producers use many column names.
pub const GEF_QUANTITY_CHANNELS: &[(u32, Channel)] = &[
    (1, Channel::PenetrationLength),
    (2, Channel::ConeResistance),
    (3, Channel::LocalFriction),
    (4, Channel::FrictionRatio),
    (5, Channel::PorePressureU1),
    (6, Channel::PorePressureU2),
    (7, Channel::PorePressureU3),
    (8, Channel::InclinationResultant),
    (9, Channel::InclinationNS),
    (10, Channel::InclinationEW),
    (11, Channel::Depth),
    (12, Channel::ElapsedTime),
    (13, Channel::CorrectedConeResistance),
    (14, Channel::NetConeResistance),
    (15, Channel::PoreRatio),
    (16, Channel::NetConeResistanceRatio),
    (17, Channel::UnitWeight),
    (18, Channel::HydrostaticPressure),
    (19, Channel::TotalVerticalStress),
    (20, Channel::EffectiveVerticalStress),
    (21, Channel::InclinationX),
    (22, Channel::InclinationY),
];

/// GEF-BORE quantity numbers for the layer boundary columns
pub mod bore_quantities {
    /// Upper boundary of the layer, metres below reference level
    pub const UPPER_BOUNDARY: u32 = 1;

    /// Lower boundary of the layer, metres below reference level
    pub const LOWER_BOUNDARY: u32 = 2;
}

/// Report codes that mark a GEF file as a borehole log
pub const GEF_BORE_REPORT_MARKER: &str = "BORE";

// =============================================================================
// BRO XML Format
// =============================================================================

/// Void value used in the BRO CPT value blob
pub const BRO_VOID_VALUE: f64 = -999_999.0;

/// Separator between values within a BRO CPT row
pub const BRO_VALUE_SEPARATOR: char = ',';

/// Separator between rows in a BRO CPT value blob
pub const BRO_ROW_SEPARATOR: char = ';';

/// Position-significant channel order of the BRO CPT value blob
pub const BRO_CPT_CHANNELS: [Channel; 25] = [
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
];

/// Date format of BRO report dates
pub const BRO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Soil name used for layers without a geotechnical soil name
pub const NOT_DESCRIBED_SOIL_NAME: &str = "NBE";

// =============================================================================
// Coordinate Reference Systems
// =============================================================================

/// Rijksdriehoeksstelsel (RD) constants
///
/// Legacy RD (EPSG:28991) has its origin at Amersfoort; RD New (EPSG:28992)
/// shifts that origin so every coordinate on Dutch territory is positive.
pub mod rd {
    /// SRID of RD New
    pub const RD_NEW_SRID: &str = "28992";

    /// Easting offset from legacy RD to RD New
    pub const FALSE_EASTING: f64 = 155_000.0;

    /// Northing offset from legacy RD to RD New
    pub const FALSE_NORTHING: f64 = 463_000.0;

    /// RD New validity window
    pub const MIN_EASTING: f64 = -7_000.0;
    pub const MAX_EASTING: f64 = 300_000.0;
    pub const MIN_NORTHING: f64 = 289_000.0;
    pub const MAX_NORTHING: f64 = 629_000.0;
}

/// Vertical datum code of NAP in GEF `#ZID` records
pub const NAP_DATUM: &str = "31000";

// =============================================================================
// Normalization Defaults
// =============================================================================

/// Instrument plausibility bounds applied after normalization
pub mod plausibility {
    pub const MIN_CONE_RESISTANCE: f64 = 0.0;
    pub const MIN_LOCAL_FRICTION: f64 = 0.0;
    pub const MIN_FRICTION_RATIO: f64 = 0.0;
    pub const MAX_FRICTION_RATIO: f64 = 12.0;
}

// =============================================================================
// Soil Classification Tables
// =============================================================================

/// D-Foundations qc-only rule, evaluated top-down
pub const QC_ONLY_RULES: &[ThresholdRule] = &[
    ThresholdRule::new("zand", Channel::ConeResistance, Bound::Above(4.0)),
    ThresholdRule::new("klei", Channel::ConeResistance, Bound::Above(1.0)),
    ThresholdRule::new("veen", Channel::ConeResistance, Bound::Above(0.1)),
];

/// Friction-ratio-only rule, evaluated top-down
pub const CUSTOM_RULES: &[ThresholdRule] = &[
    ThresholdRule::new("zand", Channel::FrictionRatio, Bound::AtMost(1.2)),
    ThresholdRule::new("veen", Channel::FrictionRatio, Bound::AtLeast(4.8)),
];

/// Label of the custom rule when no threshold applies
pub const CUSTOM_DEFAULT_LABEL: &str = "klei";

/// D-Foundations three-type rule: upper boundaries as (qc at Rf=0, qc at Rf=10)
pub const THREE_TYPE_BOUNDARIES: &[BoundaryLine] = &[
    BoundaryLine::new("veen", 0.00002, 0.2),
    BoundaryLine::new("klei", 0.01, 100.0),
    BoundaryLine::new("zand", 0.5, 5000.0),
];

/// D-Foundations NEN rule: upper boundaries as (qc at Rf=0, qc at Rf=10)
///
/// The soft-consistency peat and humous clay lines of the printed table do
/// not fit the diagram and are left out; the peat line starts at 0.000058.
pub const NEN_BOUNDARIES: &[BoundaryLine] = &[
    BoundaryLine::new("veen", 0.000058, 0.58),
    BoundaryLine::new("humeuzeKlei", 0.02, 201.0),
    BoundaryLine::new("klei", 0.068, 676.1),
    BoundaryLine::new("zwakZandigeKlei", 0.292, 2921.0),
    BoundaryLine::new("sterkZandigeKlei", 0.516, 5165.0),
    BoundaryLine::new("zwakZandigSilt", 1.124, 11240.0),
    BoundaryLine::new("sterkZandigSilt", 2.498, 24980.0),
    BoundaryLine::new("sterkSiltigZand", 4.606, 46060.0),
    BoundaryLine::new("zwakSiltigZand", 8.594, 85940.0),
    BoundaryLine::new("zand", 13.11, 131100.0),
    BoundaryLine::new("grind", 24.92, 249200.0),
];

/// Friction ratio at the right-hand end of every boundary line
pub const BOUNDARY_LINE_SPAN: f64 = 10.0;

/// Non-normalized Robertson soil behaviour type zones, in evaluation order
///
/// From "Soil Behaviour Type from the CPT: an update" (Robertson, 2010).
pub const ROBERTSON_ZONES: &[RobertsonZone] = &[
    RobertsonZone::new("veen", 3.6),
    RobertsonZone::new("klei", 2.95),
    RobertsonZone::new("zwakKleiigSilt", 2.6),
    RobertsonZone::new("zwakSiltigZand", 2.05),
    RobertsonZone::new("sterkSiltigZand", 1.31),
    RobertsonZone::new("zand", 0.0),
];

/// Robertson chart constants
pub mod robertson {
    /// Centre of the concentric zone circles on the log(qc/pa) axis
    pub const CENTRE_LOG_QC: f64 = 3.47;

    /// Offset added to the friction ratio before taking its logarithm
    pub const FRICTION_RATIO_OFFSET: f64 = 1.22;

    /// Atmospheric pressure in kPa
    pub const ATMOSPHERIC_PRESSURE_KPA: f64 = 100.0;

    /// kPa per MPa
    pub const KPA_PER_MPA: f64 = 1000.0;
}

// =============================================================================
// Component Decomposition Tables
// =============================================================================

/// Lithology order of the fraction vectors in [`SOIL_NAME_COMPONENTS`]
pub const COMPONENT_ORDER: [Lithology; 7] = [
    Lithology::Gravel,
    Lithology::Sand,
    Lithology::Clay,
    Lithology::Loam,
    Lithology::Peat,
    Lithology::Silt,
    Lithology::Special,
];

/// BRO geotechnical soil names and their fixed component fractions
///
/// After the pygef BRO reader. Vectors follow [`COMPONENT_ORDER`].
pub const SOIL_NAME_COMPONENTS: &[(&str, [f64; 7])] = &[
    ("betonOngebroken", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
    ("grind", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("humeuzeKlei", [0.0, 0.0, 0.9, 0.0, 0.1, 0.0, 0.0]),
    ("keitjes", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("klei", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
    ("kleiigVeen", [0.0, 0.0, 0.3, 0.0, 0.7, 0.0, 0.0]),
    ("kleiigZand", [0.0, 0.7, 0.3, 0.0, 0.0, 0.0, 0.0]),
    ("kleiigZandMetGrind", [0.05, 0.65, 0.3, 0.0, 0.0, 0.0, 0.0]),
    ("NBE", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
    ("puin", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
    ("silt", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
    ("siltigZand", [0.0, 0.7, 0.0, 0.0, 0.0, 0.3, 0.0]),
    ("siltigZandMetGrind", [0.05, 0.65, 0.0, 0.0, 0.0, 0.3, 0.0]),
    ("sterkGrindigZand", [0.3, 0.7, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("sterkGrindigeKlei", [0.3, 0.0, 0.7, 0.0, 0.0, 0.0, 0.0]),
    ("sterkSiltigZand", [0.0, 0.7, 0.0, 0.0, 0.0, 0.3, 0.0]),
    ("sterkZandigGrind", [0.7, 0.3, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("sterkZandigSilt", [0.0, 0.3, 0.0, 0.0, 0.0, 0.7, 0.0]),
    ("sterkZandigeKlei", [0.0, 0.3, 0.7, 0.0, 0.0, 0.0, 0.0]),
    ("sterkZandigeKleiMetGrind", [0.05, 0.3, 0.65, 0.0, 0.0, 0.0, 0.0]),
    ("sterkZandigVeen", [0.0, 0.3, 0.0, 0.0, 0.7, 0.0, 0.0]),
    ("veen", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
    ("zand", [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("zwakGrindigZand", [0.1, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("zwakGrindigeKlei", [0.1, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0]),
    ("zwakSiltigZand", [0.0, 0.9, 0.0, 0.0, 0.0, 0.1, 0.0]),
    ("zwakSiltigeKlei", [0.0, 0.0, 0.9, 0.0, 0.0, 0.1, 0.0]),
    ("zwakZandigGrind", [0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("zwakZandigSilt", [0.0, 0.9, 0.0, 0.0, 0.0, 0.1, 0.0]),
    ("zwakZandigVeen", [0.0, 0.1, 0.0, 0.0, 0.9, 0.0, 0.0]),
    ("zwakZandigeKlei", [0.0, 0.1, 0.9, 0.0, 0.0, 0.0, 0.0]),
    ("zwakZandigeKleiMetGrind", [0.05, 0.1, 0.85, 0.0, 0.0, 0.0, 0.0]),
];

/// NEN 5104 main-component letters of GEF borehole soil codes
pub const MAIN_COMPONENT_LETTERS: &[(char, Lithology)] = &[
    ('G', Lithology::Gravel),
    ('Z', Lithology::Sand),
    ('K', Lithology::Clay),
    ('L', Lithology::Loam),
    ('V', Lithology::Peat),
    ('H', Lithology::Peat),
    ('S', Lithology::Silt),
    ('N', Lithology::Special),
];

/// Fraction per intensity step of the 2nd, 3rd and 4th component of a soil code
pub const MODIFIER_INCREMENTS: [f64; 3] = [0.05, 0.049, 0.048];

/// Tolerance for component fractions summing to one
pub const COMPONENT_SUM_TOLERANCE: f64 = 1e-6;

// =============================================================================
// GEF Export
// =============================================================================

/// GEF export defaults
pub mod gef_export {
    /// Literal written for missing values
    pub const VOID_LITERAL: &str = "999";

    /// Default `#FILEOWNER`
    pub const DEFAULT_FILE_OWNER: &str = "gefxml";

    /// Decimal places of exported CPT values
    pub const CPT_DECIMALS: usize = 3;

    /// Decimal places of exported layer boundaries
    pub const BORE_DECIMALS: usize = 2;
}

// =============================================================================
// Batch Processing
// =============================================================================

/// File extension of GEF files (compared case-insensitively)
pub const GEF_EXTENSION: &str = "gef";

/// File extension of BRO XML files (compared case-insensitively)
pub const XML_EXTENSION: &str = "xml";
