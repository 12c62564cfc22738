//! Core GefWriter implementation

use super::format::{format_value, gef_date, push_record, text_field};
use crate::app::models::{Borehole, Channel, SoilLayer, Sounding, SurveyMetadata};
use crate::config::ExportConfig;
use crate::constants::{NAP_DATUM, rd};
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Exported CPT columns in order, as (channel, unit, description)
///
/// Pore pressure u2 is only written when a sample carries it.
pub const CPT_EXPORT_COLUMNS: [(Channel, &str, &str); 6] = [
    (Channel::PenetrationLength, "m (meter)", "sondeertrajectlengte"),
    (Channel::ConeResistance, "MPa (megaPascal)", "conusweerstand"),
    (Channel::Depth, "m (meter)", "diepte"),
    (Channel::LocalFriction, "MPa (megaPascal)", "plaatselijke wrijving"),
    (Channel::FrictionRatio, "% (procent; MPa/MPa)", "wrijvingsgetal"),
    (Channel::PorePressureU2, "MPa (megaPascal)", "waterspanning u2"),
];

const DATA_SEPARATOR: char = ';';

/// Serializes canonical records to GEF text
#[derive(Debug, Clone, Default)]
pub struct GefWriter {
    config: ExportConfig,
}

impl GefWriter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// GEF-CPT text of a sounding
    pub fn cpt_to_string(&self, sounding: &Sounding) -> String {
        let all_columns = CPT_EXPORT_COLUMNS;
        let columns = if sounding.has_channel(Channel::PorePressureU2) {
            &all_columns[..]
        } else {
            &all_columns[..5]
        };
        let metadata = &sounding.metadata;
        let mut out = String::new();

        push_record(&mut out, "GEFID", "1, 1, 0");
        push_record(&mut out, "COLUMN", columns.len());
        for (i, (channel, unit, description)) in columns.iter().enumerate() {
            let quantity = channel.quantity_number().unwrap_or_default();
            push_record(
                &mut out,
                "COLUMNINFO",
                format!("{}, {}, {}, {}", i + 1, unit, description, quantity),
            );
        }
        push_record(&mut out, "COLUMNSEPARATOR", DATA_SEPARATOR);
        for i in 0..columns.len() {
            push_record(
                &mut out,
                "COLUMNVOID",
                format!("{}, {}", i + 1, self.config.void_literal),
            );
        }
        self.push_company(&mut out, metadata);
        if let Some(date) = metadata.date {
            push_record(&mut out, "FILEDATE", gef_date(date));
        }
        push_record(&mut out, "FILEOWNER", &self.config.file_owner);
        push_record(&mut out, "LASTSCAN", sounding.len());
        push_record(
            &mut out,
            "PROJECTID",
            metadata.project_id.as_deref().unwrap_or(&self.config.file_owner),
        );
        push_record(&mut out, "REPORTCODE", "GEF-CPT-Report, 1, 1, 2");
        if let Some(date) = metadata.date {
            push_record(&mut out, "STARTDATE", gef_date(date));
            push_record(&mut out, "STARTTIME", "12, 00, 00");
        }
        self.push_location(&mut out, metadata);
        out.push_str("#EOH=\n");

        for sample in &sounding.samples {
            let row: Vec<String> = columns
                .iter()
                .map(|(channel, _, _)| {
                    format_value(
                        sample.get(*channel),
                        self.config.cpt_decimals,
                        &self.config.void_literal,
                    )
                })
                .collect();
            out.push_str(&row.join(&DATA_SEPARATOR.to_string()));
            out.push('\n');
        }

        debug!(
            "{}: serialized {} samples in {} columns",
            metadata.source_name(),
            sounding.len(),
            columns.len()
        );
        out
    }

    /// GEF-BORE text of the field description of a borehole
    ///
    /// A log without field description exports its first description.
    pub fn borehole_to_string(&self, borehole: &Borehole) -> String {
        let metadata = &borehole.metadata;
        let layers = export_layers(borehole);
        let mut out = String::new();

        push_record(&mut out, "GEFID", "1, 1, 0");
        push_record(&mut out, "FILEOWNER", &self.config.file_owner);
        if let Some(date) = metadata.date {
            push_record(&mut out, "FILEDATE", gef_date(date));
        }
        push_record(
            &mut out,
            "PROJECTID",
            metadata.project_id.as_deref().unwrap_or(&self.config.file_owner),
        );
        push_record(&mut out, "COLUMN", 2);
        push_record(&mut out, "COLUMNINFO", "1, m, Laag van, 1");
        push_record(&mut out, "COLUMNINFO", "2, m, Laag tot, 2");
        self.push_company(&mut out, metadata);
        push_record(&mut out, "DATAFORMAT", "ASCII");
        push_record(&mut out, "COLUMNSEPARATOR", DATA_SEPARATOR);
        push_record(&mut out, "LASTSCAN", layers.len());
        self.push_location(&mut out, metadata);
        push_record(&mut out, "PROCEDURECODE", "GEF-BORE-Report, 1, 0, 0, -");
        if let Some(date) = metadata.date {
            push_record(
                &mut out,
                "MEASUREMENTTEXT",
                format!("16, {}, datum boring", date.format("%Y-%m-%d")),
            );
        }
        push_record(&mut out, "REPORTCODE", "GEF-BORE-Report, 1, 0, 0, -");
        push_record(&mut out, "OS", "DOS");
        push_record(&mut out, "LANGUAGE", "NL");
        out.push_str("#EOH=\n");

        for layer in layers {
            out.push_str(&self.layer_row(layer));
            out.push('\n');
        }

        out
    }

    /// `top;bottom;soil name;sand median;;organic matter;;`
    fn layer_row(&self, layer: &SoilLayer) -> String {
        let property = |key: &str| {
            text_field(layer.properties.get(key).map(String::as_str), DATA_SEPARATOR)
        };
        format!(
            "{top:.d$};{bottom:.d$};{soil};{sand};;{organic};;",
            top = layer.upper_boundary,
            bottom = layer.lower_boundary,
            soil = text_field(Some(layer.soil_name.as_str()), DATA_SEPARATOR),
            sand = property("sandMedianClass"),
            organic = property("organicMatterContentClass"),
            d = self.config.bore_decimals,
        )
    }

    fn push_company(&self, out: &mut String, metadata: &SurveyMetadata) {
        push_record(
            out,
            "COMPANYID",
            format!("{}, -, 31", metadata.company_id.as_deref().unwrap_or("-")),
        );
    }

    fn push_location(&self, out: &mut String, metadata: &SurveyMetadata) {
        if let Some(testid) = &metadata.testid {
            push_record(out, "TESTID", testid);
        }
        if let (Some(easting), Some(northing)) = (metadata.easting, metadata.northing) {
            let srid = metadata.srid.as_deref().unwrap_or(rd::RD_NEW_SRID);
            push_record(out, "XYID", format!("{}, {}, {}", srid, easting, northing));
        }
        if let Some(groundlevel) = metadata.groundlevel {
            push_record(out, "ZID", format!("{}, {}", NAP_DATUM, groundlevel));
        }
    }

    /// Write a sounding as GEF-CPT, creating the parent directory
    pub async fn write_cpt(&self, sounding: &Sounding, path: &Path) -> Result<()> {
        write_text(path, self.cpt_to_string(sounding)).await
    }

    /// Write a borehole as GEF-BORE, creating the parent directory
    pub async fn write_borehole(&self, borehole: &Borehole, path: &Path) -> Result<()> {
        write_text(path, self.borehole_to_string(borehole)).await
    }
}

fn export_layers(borehole: &Borehole) -> &[SoilLayer] {
    let field = borehole.field_layers();
    if !field.is_empty() {
        return field;
    }
    borehole
        .layers
        .values()
        .find(|layers| !layers.is_empty())
        .map(Vec::as_slice)
        .unwrap_or(field)
}

async fn write_text(path: &Path, text: String) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io("Failed to create output directory".to_string(), e))?;
    }
    tokio::fs::write(path, text)
        .await
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
    info!("Wrote {}", path.display());
    Ok(())
}
