//! Integration tests for the properties every processed survey must satisfy

use gefxml_processor::app::services::gef_parser::GefParser;
use gefxml_processor::app::services::layer_model::{
    component_sum, decode_compound_code, soil_name_components,
};
use gefxml_processor::app::services::record_processor::{
    DepthMethod, RecordProcessor, reconstruct_depth,
};
use gefxml_processor::app::services::soil_classifier::{BoundaryLine, ChartPoint, SoilClassifier};
use gefxml_processor::{Channel, Error, Sample};

const HEADER: &str = "#GEFID= 1, 1, 0
#COLUMN= 4
#COLUMNINFO= 1, m, Sondeertrajectlengte, 1
#COLUMNINFO= 2, MPa, Conusweerstand, 2
#COLUMNINFO= 3, MPa, Plaatselijke wrijving, 3
#COLUMNINFO= 4, %, Wrijvingsgetal, 4
#COLUMNSEPARATOR= ;
#TESTID= P-1
";

fn cpt_with(extra_header: &str, data: &str) -> String {
    format!("{}{}#EOH=\n{}", HEADER, extra_header, data)
}

#[test]
fn test_qc_only_ignores_friction_ratio() {
    let classifier = SoilClassifier::new();
    for qc in [0.2, 0.9, 1.0, 1.5, 4.0, 4.01, 25.0] {
        let reference = classifier.qc_only(ChartPoint::new(qc, 0.0));
        for rf in [0.5, 2.0, 5.0, 11.9] {
            assert_eq!(classifier.qc_only(ChartPoint::new(qc, rf)), reference);
        }
    }
}

#[test]
fn test_point_on_boundary_line_is_not_below() {
    let line = BoundaryLine::new("klei", 1.0, 100.0);
    let on_line = ChartPoint::new(10.0, 5.0);

    assert_eq!(line.cross(&on_line), 0.0);
    assert!(!line.is_below(&on_line));
    assert!(line.is_below(&ChartPoint::new(10.0, 5.1)));

    // exactly on the three-type clay boundary falls through to sand
    let classifier = SoilClassifier::new();
    assert_eq!(classifier.three_type(ChartPoint::new(0.01, 0.0)), Some("zand"));
    assert_eq!(classifier.three_type(ChartPoint::new(0.0099, 0.0)), Some("klei"));
}

#[test]
fn test_reconstructed_depth_is_monotonic() {
    let mut samples: Vec<Sample> = (0..=20)
        .map(|i| {
            let pl = i as f64 * 0.05;
            Sample::from_values([
                (Channel::PenetrationLength, pl),
                (Channel::InclinationResultant, (i % 7) as f64 * 4.0),
                (Channel::ConeResistance, 1.0),
            ])
        })
        .collect();

    let method = reconstruct_depth(&mut samples);
    assert_eq!(method, DepthMethod::ResultantInclination);

    let depths: Vec<f64> = samples.iter().filter_map(Sample::depth).collect();
    assert_eq!(depths.len(), samples.len() - 1);
    assert!(depths.windows(2).all(|pair| pair[1] >= pair[0]));
    for sample in samples.iter().skip(1) {
        let pl = sample.get(Channel::PenetrationLength).unwrap();
        assert!(sample.depth().unwrap() <= pl + 1e-9);
    }
}

#[test]
fn test_implausible_samples_are_dropped() {
    let data = "0.10;1.00;0.010;1.0;
0.20;1.20;0.150;12.5;
0.30;-0.50;0.010;2.0;
0.40;2.00;0.020;1.0;
0.50;3.00;0.030;12.0;
";
    let raw = GefParser::new()
        .parse_cpt_str(&cpt_with("", data), "filter.gef")
        .unwrap();
    let result = RecordProcessor::default().normalize(raw).unwrap();

    assert_eq!(result.stats.input_samples, 5);
    assert_eq!(result.stats.dropped_out_of_range, 2);
    assert_eq!(result.sample_count(), 3);
    for sample in &result.sounding.samples {
        assert!(sample.cone_resistance().unwrap() >= 0.0);
        assert!(sample.friction_ratio().unwrap() <= 12.0);
    }
}

#[test]
fn test_component_fractions_sum_to_one() {
    for code in ["Z", "Zs1", "Ks2h1", "Kz3s2h1", "Vk1", "Gz2", "Lz1", "Sk3", "Zg3k2s1"] {
        let components = decode_compound_code(code);
        assert!(
            (component_sum(&components) - 1.0).abs() <= 1e-6,
            "{} sums to {}",
            code,
            component_sum(&components)
        );
    }

    for name in ["zand", "zwakSiltigZand", "humeuzeKlei", "veen", "puin", "onbekendeGrond"] {
        let components = soil_name_components(name);
        assert!((component_sum(&components) - 1.0).abs() <= 1e-6, "{}", name);
    }
}

#[test]
fn test_legacy_rd_coordinates_are_reprojected() {
    let gef = cpt_with("#XYID= 31000, -500, 1000\n", "0.10;1.00;0.010;1.0;\n");
    let raw = GefParser::new().parse_cpt_str(&gef, "legacy.gef").unwrap();

    assert_eq!(raw.metadata.easting, Some(154500.0));
    assert_eq!(raw.metadata.northing, Some(464000.0));
    assert_eq!(raw.metadata.srid.as_deref(), Some("28992"));
}

#[test]
fn test_legacy_rd_outside_area_fails() {
    let gef = cpt_with("#XYID= 31000, -500000, 1000\n", "0.10;1.00;0.010;1.0;\n");
    let result = GefParser::new().parse_cpt_str(&gef, "far.gef");

    assert!(matches!(result, Err(Error::CoordinateTransform { .. })));
}
