//! Classification rule primitives
//!
//! Rule tables themselves live in [`crate::constants`]; this module gives
//! them their geometric meaning.

use crate::app::models::Channel;
use crate::constants::{BOUNDARY_LINE_SPAN, robertson};

/// Position of a sample in the classification chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Cone resistance in MPa
    pub cone_resistance: f64,

    /// Friction ratio in percent
    pub friction_ratio: f64,
}

impl ChartPoint {
    pub fn new(cone_resistance: f64, friction_ratio: f64) -> Self {
        Self {
            cone_resistance,
            friction_ratio,
        }
    }

    /// Chart coordinate for a channel; other channels are not charted
    pub fn get(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::ConeResistance => Some(self.cone_resistance),
            Channel::FrictionRatio => Some(self.friction_ratio),
            _ => None,
        }
    }
}

/// One candidate of an ordered rule list
pub trait Rule {
    fn label(&self) -> &'static str;

    fn applies(&self, point: &ChartPoint) -> bool;
}

/// Label of the first rule that applies, in declared order
pub fn first_match<R: Rule>(rules: &[R], point: &ChartPoint) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| rule.applies(point))
        .map(Rule::label)
}

// =============================================================================
// Thresholds
// =============================================================================

/// Comparison of a channel value against a threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// value > threshold
    Above(f64),
    /// value <= threshold
    AtMost(f64),
    /// value >= threshold
    AtLeast(f64),
}

impl Bound {
    pub fn holds(&self, value: f64) -> bool {
        match *self {
            Bound::Above(threshold) => value > threshold,
            Bound::AtMost(threshold) => value <= threshold,
            Bound::AtLeast(threshold) => value >= threshold,
        }
    }
}

/// Label assigned when one channel satisfies a bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRule {
    pub label: &'static str,
    pub channel: Channel,
    pub bound: Bound,
}

impl ThresholdRule {
    pub const fn new(label: &'static str, channel: Channel, bound: Bound) -> Self {
        Self {
            label,
            channel,
            bound,
        }
    }
}

impl Rule for ThresholdRule {
    fn label(&self) -> &'static str {
        self.label
    }

    fn applies(&self, point: &ChartPoint) -> bool {
        point
            .get(self.channel)
            .is_some_and(|value| self.bound.holds(value))
    }
}

// =============================================================================
// Boundary Lines
// =============================================================================

/// Upper boundary of a soil type in the (Rf, log10 qc) chart
///
/// The line runs from (0, log10 `qc_at_zero`) to
/// ([`BOUNDARY_LINE_SPAN`], log10 `qc_at_ten`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryLine {
    pub label: &'static str,
    pub qc_at_zero: f64,
    pub qc_at_ten: f64,
}

impl BoundaryLine {
    pub const fn new(label: &'static str, qc_at_zero: f64, qc_at_ten: f64) -> Self {
        Self {
            label,
            qc_at_zero,
            qc_at_ten,
        }
    }

    /// Cross product of (point - A) and (B - A); positive below the line
    pub fn cross(&self, point: &ChartPoint) -> f64 {
        let start_y = self.qc_at_zero.log10();
        let (dx, dy) = (BOUNDARY_LINE_SPAN, self.qc_at_ten.log10() - start_y);
        let (px, py) = (point.friction_ratio, point.cone_resistance.log10() - start_y);
        px * dy - py * dx
    }

    /// Strictly below the line; a point on the line is not
    pub fn is_below(&self, point: &ChartPoint) -> bool {
        self.cross(point) > 0.0
    }
}

impl Rule for BoundaryLine {
    fn label(&self) -> &'static str {
        self.label
    }

    fn applies(&self, point: &ChartPoint) -> bool {
        self.is_below(point)
    }
}

// =============================================================================
// Robertson Zones
// =============================================================================

/// Distance of a point from the centre of the non-normalized Robertson chart
pub fn behaviour_index(point: &ChartPoint) -> f64 {
    let normalized_qc =
        point.cone_resistance * robertson::KPA_PER_MPA / robertson::ATMOSPHERIC_PRESSURE_KPA;
    let log_qc = normalized_qc.log10();
    let log_rf = (point.friction_ratio + robertson::FRICTION_RATIO_OFFSET).log10();
    ((robertson::CENTRE_LOG_QC - log_qc).powi(2) + log_rf.powi(2)).sqrt()
}

/// Zone applying to every point further from the centre than its index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobertsonZone {
    pub label: &'static str,
    pub index: f64,
}

impl RobertsonZone {
    pub const fn new(label: &'static str, index: f64) -> Self {
        Self { label, index }
    }
}

impl Rule for RobertsonZone {
    fn label(&self) -> &'static str {
        self.label
    }

    fn applies(&self, point: &ChartPoint) -> bool {
        behaviour_index(point) - self.index > 0.0
    }
}
