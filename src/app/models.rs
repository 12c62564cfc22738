//! Data models for geotechnical survey records
//!
//! This module contains the canonical in-memory records produced by the GEF
//! and BRO XML parsers: cone penetration soundings made of depth samples and
//! borehole logs made of soil layers, together with the metadata both share.

pub mod channel;
pub mod issues;
pub mod table;

pub use channel::Channel;
pub use issues::{FieldResult, ParseIssue, ParseStats};
pub use table::{ColumnConflict, ColumnMap, RawTable, VoidMap};

use crate::constants::COMPONENT_SUM_TOLERANCE;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Survey Metadata
// =============================================================================

/// Metadata shared by soundings and borehole logs
///
/// Every field is optional: both formats are loosely specified and a missing
/// field never aborts a parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyMetadata {
    /// Test identifier (GEF `#TESTID`, BRO `broId`)
    pub testid: Option<String>,

    /// Easting in the coordinate system given by `srid`
    pub easting: Option<f64>,

    /// Northing in the coordinate system given by `srid`
    pub northing: Option<f64>,

    /// Ground level relative to the vertical datum (NAP), metres
    pub groundlevel: Option<f64>,

    /// Coordinate reference system identifier (e.g. "28992")
    pub srid: Option<String>,

    /// Survey date (`#STARTDATE` for CPT, `#FILEDATE` for boreholes)
    pub date: Option<NaiveDate>,

    pub company_id: Option<String>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,

    /// Final depth below ground level, metres
    pub final_depth: Option<f64>,

    /// Report code of the source file (e.g. "GEF-CPT-Report")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_code: Option<String>,

    /// File the record was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SurveyMetadata {
    /// Reference level for absolute elevations; a missing ground level is 0
    pub fn reference_level(&self) -> f64 {
        self.groundlevel.unwrap_or(0.0)
    }

    /// Name used in logs and error messages
    pub fn source_name(&self) -> &str {
        self.source
            .as_deref()
            .or(self.testid.as_deref())
            .unwrap_or("<unnamed>")
    }
}

// =============================================================================
// Sounding (CPT)
// =============================================================================

/// One depth sample of a sounding
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sample {
    /// Channel values present at this sample
    pub values: BTreeMap<Channel, f64>,

    /// Soil classification, once the classifier has run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sample from channel/value pairs
    pub fn from_values(values: impl IntoIterator<Item = (Channel, f64)>) -> Self {
        Self {
            values: values.into_iter().collect(),
            classification: None,
        }
    }

    pub fn get(&self, channel: Channel) -> Option<f64> {
        self.values.get(&channel).copied()
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        self.values.insert(channel, value);
    }

    pub fn remove(&mut self, channel: Channel) -> Option<f64> {
        self.values.remove(&channel)
    }

    pub fn has(&self, channel: Channel) -> bool {
        self.values.contains_key(&channel)
    }

    pub fn depth(&self) -> Option<f64> {
        self.get(Channel::Depth)
    }

    pub fn cone_resistance(&self) -> Option<f64> {
        self.get(Channel::ConeResistance)
    }

    pub fn friction_ratio(&self) -> Option<f64> {
        self.get(Channel::FrictionRatio)
    }
}

/// A cone penetration test
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sounding {
    pub metadata: SurveyMetadata,

    /// Samples sorted ascending by depth once normalized
    pub samples: Vec<Sample>,

    /// Layers excavated before the test (BRO `removedLayer`)
    pub removed_layers: Vec<BTreeMap<String, String>>,
}

impl Sounding {
    pub fn new(metadata: SurveyMetadata, samples: Vec<Sample>) -> Self {
        Self {
            metadata,
            samples,
            removed_layers: Vec::new(),
        }
    }

    /// Whether any sample carries the channel
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.samples.iter().any(|sample| sample.has(channel))
    }

    /// Values of one channel in sample order
    pub fn channel_values(&self, channel: Channel) -> impl Iterator<Item = Option<f64>> + '_ {
        self.samples.iter().map(move |sample| sample.get(channel))
    }

    /// Deepest sample depth
    pub fn max_depth(&self) -> Option<f64> {
        self.channel_values(Channel::Depth)
            .flatten()
            .fold(None, |max, depth| match max {
                Some(current) if current >= depth => Some(current),
                _ => Some(depth),
            })
    }

    /// Whether every sample has been classified
    pub fn is_classified(&self) -> bool {
        !self.samples.is_empty() && self.samples.iter().all(|s| s.classification.is_some())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Sounding as read from a file, before normalization
#[derive(Debug, Clone, Default)]
pub struct RawSounding {
    pub metadata: SurveyMetadata,
    pub table: RawTable,
    pub columns: ColumnMap,
    pub voids: VoidMap,
    pub removed_layers: Vec<BTreeMap<String, String>>,
    pub stats: ParseStats,
}

// =============================================================================
// Soil Classification
// =============================================================================

/// Soil classification rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpretationModel {
    /// D-Foundations rule on cone resistance alone
    QcOnly,
    /// D-Foundations three soil types
    ThreeType,
    /// D-Foundations NEN table
    Nen,
    /// Non-normalized Robertson (2010) soil behaviour type
    Robertson,
    /// Friction ratio thresholds
    #[default]
    Custom,
}

impl InterpretationModel {
    pub const ALL: [InterpretationModel; 5] = [
        InterpretationModel::QcOnly,
        InterpretationModel::ThreeType,
        InterpretationModel::Nen,
        InterpretationModel::Robertson,
        InterpretationModel::Custom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InterpretationModel::QcOnly => "qc-only",
            InterpretationModel::ThreeType => "three-type",
            InterpretationModel::Nen => "nen",
            InterpretationModel::Robertson => "robertson",
            InterpretationModel::Custom => "custom",
        }
    }
}

impl fmt::Display for InterpretationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpretationModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "qc-only" | "qconly" => Ok(InterpretationModel::QcOnly),
            "three-type" | "threetype" => Ok(InterpretationModel::ThreeType),
            "nen" => Ok(InterpretationModel::Nen),
            "robertson" => Ok(InterpretationModel::Robertson),
            "custom" => Ok(InterpretationModel::Custom),
            _ => Err(format!(
                "Unknown interpretation model: {} (expected one of qc-only, three-type, nen, robertson, custom)",
                s
            )),
        }
    }
}

/// Labels assigned to one sample by every rule set
///
/// Labels are BRO geotechnical soil name tokens (`zand`, `klei`, ...).
/// `None` means the rule set leaves the sample unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub qc_only: Option<&'static str>,
    pub three_type: Option<&'static str>,
    pub nen: Option<&'static str>,
    pub robertson: Option<&'static str>,
    pub custom: &'static str,
}

impl Classification {
    pub fn label(&self, model: InterpretationModel) -> Option<&'static str> {
        match model {
            InterpretationModel::QcOnly => self.qc_only,
            InterpretationModel::ThreeType => self.three_type,
            InterpretationModel::Nen => self.nen,
            InterpretationModel::Robertson => self.robertson,
            InterpretationModel::Custom => Some(self.custom),
        }
    }
}

// =============================================================================
// Borehole
// =============================================================================

/// Lithology category of a component fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lithology {
    Gravel,
    Sand,
    Clay,
    Loam,
    Peat,
    Silt,
    Special,
    Undefined,
}

impl Lithology {
    pub fn name(&self) -> &'static str {
        match self {
            Lithology::Gravel => "gravel",
            Lithology::Sand => "sand",
            Lithology::Clay => "clay",
            Lithology::Loam => "loam",
            Lithology::Peat => "peat",
            Lithology::Silt => "silt",
            Lithology::Special => "special",
            Lithology::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Lithology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a borehole description was made
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DescriptionLocation {
    /// BRO `veld`
    Field,
    /// BRO `lab`
    Lab,
    Other(String),
}

impl DescriptionLocation {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "veld" => DescriptionLocation::Field,
            "lab" => DescriptionLocation::Lab,
            other => DescriptionLocation::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            DescriptionLocation::Field => "veld",
            DescriptionLocation::Lab => "lab",
            DescriptionLocation::Other(code) => code,
        }
    }
}

/// One described soil layer of a borehole
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilLayer {
    /// Top of the layer, metres below the reference level
    pub upper_boundary: f64,

    /// Bottom of the layer, metres below the reference level
    pub lower_boundary: f64,

    /// Top of the layer as elevation relative to NAP
    pub upper_elevation: f64,

    /// Bottom of the layer as elevation relative to NAP
    pub lower_elevation: f64,

    /// Soil name token (BRO name or GEF soil code)
    pub soil_name: String,

    /// Remaining descriptive properties of the layer
    pub properties: BTreeMap<String, String>,

    /// Lithology fractions, zero entries omitted
    pub components: BTreeMap<Lithology, f64>,
}

impl SoilLayer {
    pub fn thickness(&self) -> f64 {
        self.upper_elevation - self.lower_elevation
    }

    /// Whether the component fractions sum to one
    pub fn components_are_complete(&self) -> bool {
        let sum: f64 = self.components.values().sum();
        (sum - 1.0).abs() <= COMPONENT_SUM_TOLERANCE
    }

    /// Lithology with the largest fraction
    pub fn dominant_lithology(&self) -> Option<Lithology> {
        self.components
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(lithology, _)| *lithology)
    }
}

/// A borehole log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Borehole {
    pub metadata: SurveyMetadata,

    /// BRO `descriptionQuality`, or "cpt" for a log derived from a sounding
    pub description_quality: Option<String>,

    /// Layers per description location, each top-down
    pub layers: BTreeMap<DescriptionLocation, Vec<SoilLayer>>,

    /// Sample analyses (BRO `investigatedInterval`)
    pub analyses: Vec<BTreeMap<String, String>>,
}

impl Borehole {
    pub fn field_layers(&self) -> &[SoilLayer] {
        self.layers
            .get(&DescriptionLocation::Field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn layer_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }
}

// =============================================================================
// Survey
// =============================================================================

/// Kind of survey record in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurveyKind {
    Cpt,
    Borehole,
}

impl fmt::Display for SurveyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyKind::Cpt => f.write_str("CPT"),
            SurveyKind::Borehole => f.write_str("borehole"),
        }
    }
}

/// A fully processed survey record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Survey {
    Cpt(Sounding),
    Borehole(Borehole),
}

impl Survey {
    pub fn kind(&self) -> SurveyKind {
        match self {
            Survey::Cpt(_) => SurveyKind::Cpt,
            Survey::Borehole(_) => SurveyKind::Borehole,
        }
    }

    pub fn metadata(&self) -> &SurveyMetadata {
        match self {
            Survey::Cpt(sounding) => &sounding.metadata,
            Survey::Borehole(borehole) => &borehole.metadata,
        }
    }
}
