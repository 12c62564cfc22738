//! Test utilities for BRO XML parser testing
//!
//! Provides trimmed-down BRO CPT and BHR-GT deliveries with the element
//! structure of real registry documents.

mod cpt_tests;

/// One value row with penetration length, depth, qc, fs and Rf set; every
/// other column carries the void value
pub fn bro_row(
    penetration_length: f64,
    depth: Option<f64>,
    cone_resistance: f64,
    local_friction: f64,
    friction_ratio: Option<f64>,
) -> String {
    let mut columns = vec!["-999999".to_string(); 25];
    columns[0] = format!("{:.3}", penetration_length);
    if let Some(depth) = depth {
        columns[1] = format!("{:.3}", depth);
    }
    columns[3] = format!("{:.3}", cone_resistance);
    columns[18] = format!("{:.4}", local_friction);
    if let Some(friction_ratio) = friction_ratio {
        columns[24] = format!("{:.2}", friction_ratio);
    }
    columns.join(",")
}

/// Standard value blob: three rows, the last with void friction ratio
pub fn standard_values() -> String {
    let rows = [
        bro_row(0.02, Some(0.02), 1.2, 0.012, Some(1.0)),
        bro_row(0.04, Some(0.04), 2.4, 0.048, Some(2.0)),
        bro_row(0.06, Some(0.06), 3.6, 0.108, None),
    ];
    rows.join(";") + ";"
}

/// A BRO CPT delivery around the given value blob
pub fn cpt_xml(values: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<dispatchDocument xmlns="http://www.broservices.nl/xsd/dscpt/1.1"
    xmlns:brocom="http://www.broservices.nl/xsd/brocommon/3.0"
    xmlns:cptcommon="http://www.broservices.nl/xsd/cptcommon/1.1"
    xmlns:gml="http://www.opengis.net/gml/3.2">
  <CPT_O gml:id="BRO_0001">
    <brocom:broId>CPT000000012345</brocom:broId>
    <brocom:deliveryAccountableParty>27376655</brocom:deliveryAccountableParty>
    <deliveredLocation>
      <cptcommon:location>
        <gml:Point gml:id="BRO_0002" srsName="urn:ogc:def:crs:EPSG::28992">
          <gml:pos>120500.00
            480250.50</gml:pos>
        </gml:Point>
      </cptcommon:location>
    </deliveredLocation>
    <deliveredVerticalPosition>
      <cptcommon:localVerticalReferencePoint>maaiveld</cptcommon:localVerticalReferencePoint>
      <cptcommon:offset uom="m">-1.23</cptcommon:offset>
    </deliveredVerticalPosition>
    <researchReportDate>
      <brocom:date>2020-06-30</brocom:date>
    </researchReportDate>
    <conePenetrometerSurvey>
      <cptcommon:finalDepth uom="m">1.50</cptcommon:finalDepth>
      <cptcommon:conePenetrationTest>
        <cptcommon:values>{}</cptcommon:values>
      </cptcommon:conePenetrationTest>
      <cptcommon:dissipationTest>
        <cptcommon:values>9,9;9,9;</cptcommon:values>
      </cptcommon:dissipationTest>
    </conePenetrometerSurvey>
    <removedLayer>
      <cptcommon:sequenceNumber>1</cptcommon:sequenceNumber>
      <cptcommon:upperBoundary uom="m">0.000</cptcommon:upperBoundary>
      <cptcommon:lowerBoundary uom="m">0.500</cptcommon:lowerBoundary>
      <cptcommon:description>klinkers</cptcommon:description>
    </removedLayer>
  </CPT_O>
</dispatchDocument>
"#,
        values
    )
}

/// A BRO BHR-GT delivery with three field layers and one sample analysis
pub const BOREHOLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dispatchDocument xmlns="http://www.broservices.nl/xsd/dsbhr-gt/2.1"
    xmlns:brocom="http://www.broservices.nl/xsd/brocommon/3.0"
    xmlns:bhrgtcom="http://www.broservices.nl/xsd/bhrgtcommon/2.1"
    xmlns:gml="http://www.opengis.net/gml/3.2">
  <BHR_GT_O gml:id="BRO_0001">
    <brocom:broId>BHR000000054321</brocom:broId>
    <deliveredLocation>
      <bhrgtcom:location>
        <gml:Point gml:id="BRO_0002" srsName="urn:ogc:def:crs:EPSG::28992">
          <gml:pos>100000 450000</gml:pos>
        </gml:Point>
      </bhrgtcom:location>
    </deliveredLocation>
    <deliveredVerticalPosition>
      <bhrgtcom:offset uom="m">2.00</bhrgtcom:offset>
    </deliveredVerticalPosition>
    <boring>
      <bhrgtcom:finalDepthBoring uom="m">3.00</bhrgtcom:finalDepthBoring>
    </boring>
    <boreholeSampleDescription>
      <bhrgtcom:descriptionReportDate>
        <brocom:date>2021-02-03</brocom:date>
      </bhrgtcom:descriptionReportDate>
      <bhrgtcom:descriptiveBoreholeLog>
        <bhrgtcom:descriptionQuality>kwaliteit2</bhrgtcom:descriptionQuality>
        <bhrgtcom:descriptionLocation>veld</bhrgtcom:descriptionLocation>
        <bhrgtcom:layer>
          <bhrgtcom:upperBoundary uom="m">0.00</bhrgtcom:upperBoundary>
          <bhrgtcom:lowerBoundary uom="m">1.00</bhrgtcom:lowerBoundary>
          <bhrgtcom:soil>
            <bhrgtcom:geotechnicalSoilName>zwakSiltigZand</bhrgtcom:geotechnicalSoilName>
            <bhrgtcom:sandMedianClass>middelfijn</bhrgtcom:sandMedianClass>
          </bhrgtcom:soil>
        </bhrgtcom:layer>
        <bhrgtcom:layer>
          <bhrgtcom:upperBoundary uom="m">1.00</bhrgtcom:upperBoundary>
          <bhrgtcom:lowerBoundary uom="m">2.50</bhrgtcom:lowerBoundary>
          <bhrgtcom:soil>
            <bhrgtcom:geotechnicalSoilName>humeuzeKlei</bhrgtcom:geotechnicalSoilName>
            <bhrgtcom:organicMatterContentClass>zwakOrganisch</bhrgtcom:organicMatterContentClass>
          </bhrgtcom:soil>
        </bhrgtcom:layer>
        <bhrgtcom:layer>
          <bhrgtcom:upperBoundary uom="m">2.50</bhrgtcom:upperBoundary>
          <bhrgtcom:lowerBoundary uom="m">3.00</bhrgtcom:lowerBoundary>
          <bhrgtcom:specialMaterial>puin</bhrgtcom:specialMaterial>
        </bhrgtcom:layer>
      </bhrgtcom:descriptiveBoreholeLog>
    </boreholeSampleDescription>
    <boreholeSampleAnalysis>
      <bhrgtcom:investigatedInterval>
        <bhrgtcom:beginDepth uom="m">1.20</bhrgtcom:beginDepth>
        <bhrgtcom:endDepth uom="m">1.40</bhrgtcom:endDepth>
        <bhrgtcom:waterContent>35</bhrgtcom:waterContent>
      </bhrgtcom:investigatedInterval>
    </boreholeSampleAnalysis>
  </BHR_GT_O>
</dispatchDocument>
"#;
