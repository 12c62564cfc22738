//! Field extraction for GEF header records
//!
//! Every extractor looks at one field in isolation and returns a
//! [`FieldResult`]: `MissingField` when the record is absent,
//! `MalformedRecord` when none of the known variants matches its value.

use super::header::GefHeader;
use crate::app::models::{FieldResult, ParseIssue};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

static XYID_WITH_DELTAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<srid>\d+)\s*,\s*(?P<x>{n})\s*,\s*(?P<y>{n})\s*,\s*(?P<dx>{n})\s*,\s*(?P<dy>{n})",
        n = NUMBER
    ))
    .expect("XYID pattern is valid")
});

static XYID_SIMPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<srid>\d+)\s*,\s*(?P<x>{n})\s*,\s*(?P<y>{n})",
        n = NUMBER
    ))
    .expect("XYID pattern is valid")
});

static XYID_EASTING_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?P<srid>\d+)\s*,\s*(?P<x>{n})\s*,?\s*$", n = NUMBER))
        .expect("XYID pattern is valid")
});

static ZID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<datum>\d+)\s*,\s*(?P<z>{n})(?:\s*,\s*(?P<dz>{n}))?",
        n = NUMBER
    ))
    .expect("ZID pattern is valid")
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<y>\d{4})\s*,\s*(?P<m>\d{1,2})\s*,\s*(?P<d>\d{1,2})")
        .expect("date pattern is valid")
});

static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+").expect("digits pattern is valid"));

/// Location as declared by `#XYID`
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub srid: String,
    pub easting: f64,
    pub northing: Option<f64>,
}

/// Column declaration from `#COLUMNINFO`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    /// Zero-based column index
    pub index: usize,
    pub unit: String,
    pub name: String,
    /// Quantity number as written
    pub quantity: String,
}

impl ColumnInfo {
    pub fn quantity_number(&self) -> Option<u32> {
        self.quantity.parse().ok()
    }
}

/// `#TESTID`
pub fn extract_testid(header: &GefHeader) -> FieldResult<String> {
    let value = header
        .value("TESTID")
        .ok_or(ParseIssue::missing("TESTID"))?;
    if value.is_empty() {
        return Err(ParseIssue::malformed("TESTID", value));
    }
    Ok(value.to_string())
}

/// `#XYID= srid, X, Y[, dX, dY]`
///
/// The form with deltas is tried first, then the plain form. A record with
/// only an easting is accepted without northing so that reprojection can
/// report it.
pub fn extract_position(header: &GefHeader) -> FieldResult<Position> {
    let value = header.value("XYID").ok_or(ParseIssue::missing("XYID"))?;

    let caps = XYID_WITH_DELTAS
        .captures(value)
        .or_else(|| XYID_SIMPLE.captures(value));

    if let Some(caps) = caps {
        let easting = parse_number(&caps["x"]);
        let northing = parse_number(&caps["y"]);
        return match (easting, northing) {
            (Some(easting), Some(northing)) => Ok(Position {
                srid: caps["srid"].to_string(),
                easting,
                northing: Some(northing),
            }),
            _ => Err(ParseIssue::malformed("XYID", value)),
        };
    }

    XYID_EASTING_ONLY
        .captures(value)
        .and_then(|caps| {
            parse_number(&caps["x"]).map(|easting| Position {
                srid: caps["srid"].to_string(),
                easting,
                northing: None,
            })
        })
        .ok_or_else(|| ParseIssue::malformed("XYID", value))
}

/// `#ZID= datum, Z[, dZ]` → ground level
pub fn extract_groundlevel(header: &GefHeader) -> FieldResult<f64> {
    let value = header.value("ZID").ok_or(ParseIssue::missing("ZID"))?;
    ZID.captures(value)
        .and_then(|caps| parse_number(&caps["z"]))
        .ok_or_else(|| ParseIssue::malformed("ZID", value))
}

/// `#COMPANYID= name, code, nr`, overridden by `#MEASUREMENTTEXT= n, name, boorbedrijf`
pub fn extract_company_id(header: &GefHeader) -> FieldResult<String> {
    if let Some(company) = measurement_text(header, "boorbedrijf") {
        return Ok(company);
    }

    let record = header
        .first("COMPANYID")
        .ok_or(ParseIssue::missing("COMPANYID"))?;
    let fields = record.fields();
    let name = if fields.len() >= 3 {
        fields[..fields.len() - 2].join(", ")
    } else {
        record.value.clone()
    };

    if name.is_empty() {
        Err(ParseIssue::malformed("COMPANYID", record.value.as_str()))
    } else {
        Ok(name)
    }
}

/// `#PROJECTID`: the leading number, or the first field when it has none
pub fn extract_project_id(header: &GefHeader) -> FieldResult<String> {
    let record = header
        .first("PROJECTID")
        .ok_or(ParseIssue::missing("PROJECTID"))?;

    if let Some(digits) = LEADING_DIGITS.find(&record.value) {
        return Ok(digits.as_str().to_string());
    }

    match record.fields().first() {
        Some(first) if !first.is_empty() && *first != "-" => Ok(first.to_string()),
        _ => Err(ParseIssue::malformed("PROJECTID", record.value.as_str())),
    }
}

/// `#PROJECTNAME`, overridden by `#MEASUREMENTTEXT= n, name, projectnaam`
pub fn extract_project_name(header: &GefHeader) -> FieldResult<String> {
    if let Some(name) = measurement_text(header, "projectnaam") {
        return Ok(name);
    }

    let value = header
        .value("PROJECTNAME")
        .ok_or(ParseIssue::missing("PROJECTNAME"))?;
    if value.is_empty() {
        return Err(ParseIssue::malformed("PROJECTNAME", value));
    }
    Ok(value.to_string())
}

/// `#STARTDATE` or `#FILEDATE` as `y, m, d`
pub fn extract_date(header: &GefHeader, key: &'static str) -> FieldResult<NaiveDate> {
    let value = header.value(key).ok_or(ParseIssue::missing(key))?;
    DATE.captures(value)
        .and_then(|caps| {
            let year = caps["y"].parse().ok()?;
            let month = caps["m"].parse().ok()?;
            let day = caps["d"].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .ok_or_else(|| ParseIssue::malformed(key, value))
}

/// `#COLUMNSEPARATOR` or `#RECORDSEPARATOR`
///
/// An empty value after trimming means the separator is whitespace.
pub fn extract_separator(header: &GefHeader, key: &'static str) -> FieldResult<String> {
    header
        .value(key)
        .map(str::to_string)
        .ok_or(ParseIssue::missing(key))
}

/// `#REPORTCODE`, falling back to `#PROCEDURECODE`; the first field only
pub fn extract_report_code(header: &GefHeader) -> FieldResult<String> {
    let record = header
        .first("REPORTCODE")
        .or_else(|| header.first("PROCEDURECODE"))
        .ok_or(ParseIssue::missing("REPORTCODE"))?;

    match record.fields().first() {
        Some(code) if !code.is_empty() => Ok(code.to_string()),
        _ => Err(ParseIssue::malformed("REPORTCODE", record.value.as_str())),
    }
}

/// Every `#COLUMNINFO= nr, unit, name, quantity`
///
/// Units sometimes contain commas, so the column number is the first field
/// and the quantity the last.
pub fn extract_column_infos(header: &GefHeader) -> Vec<FieldResult<ColumnInfo>> {
    header
        .all("COLUMNINFO")
        .map(|record| {
            let fields = record.fields();
            let malformed = || ParseIssue::malformed("COLUMNINFO", record.value.as_str());

            if fields.len() < 2 {
                return Err(malformed());
            }
            let index = parse_column_number(fields[0]).ok_or_else(malformed)?;
            let quantity = fields[fields.len() - 1].to_string();
            if quantity.is_empty() {
                return Err(malformed());
            }
            let (unit, name) = match fields.len() {
                0..=2 => (String::new(), String::new()),
                3 => (fields[1].to_string(), String::new()),
                n => (fields[1..n - 2].join(", "), fields[n - 2].to_string()),
            };

            Ok(ColumnInfo {
                index,
                unit,
                name,
                quantity,
            })
        })
        .collect()
}

/// Every `#COLUMNVOID= nr, value` as (zero-based index, void value)
pub fn extract_column_voids(header: &GefHeader) -> Vec<FieldResult<(usize, f64)>> {
    header
        .all("COLUMNVOID")
        .map(|record| {
            let fields = record.fields();
            let index = fields.first().and_then(|f| parse_column_number(f));
            let void = fields.get(1).and_then(|f| parse_number(f));
            match (index, void) {
                (Some(index), Some(void)) => Ok((index, void)),
                _ => Err(ParseIssue::malformed("COLUMNVOID", record.value.as_str())),
            }
        })
        .collect()
}

/// `#MEASUREMENTTEXT= n, text, label` whose last field is `label`
fn measurement_text(header: &GefHeader, label: &str) -> Option<String> {
    header.all("MEASUREMENTTEXT").find_map(|record| {
        let fields = record.fields();
        if fields.len() >= 3 && fields[fields.len() - 1].eq_ignore_ascii_case(label) {
            let text = fields[1..fields.len() - 1].join(", ");
            (!text.is_empty()).then_some(text)
        } else {
            None
        }
    })
}

/// One-based column number to zero-based index
fn parse_column_number(field: &str) -> Option<usize> {
    field
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|nr| nr.checked_sub(1))
}

pub(crate) fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
