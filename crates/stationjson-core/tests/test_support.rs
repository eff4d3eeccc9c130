//! Shared StationXML fixture builders for integration tests

#![allow(dead_code)]

pub const NS: &str = "http://www.fdsn.org/xml/station/1";

/// Wrap network elements in an FDSNStationXML root
pub fn document(networks: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<FDSNStationXML xmlns="{NS}" schemaVersion="1.1">
  <Source>test</Source>
  <Created>2024-01-01T00:00:00</Created>
  {}
</FDSNStationXML>"#,
        networks.join("\n")
    )
}

pub fn leaf(tag: &str, text: &str) -> String {
    format!("<{tag}>{text}</{tag}>")
}

pub fn units(tag: &str, name: &str) -> String {
    format!("<{tag}><Name>{name}</Name></{tag}>")
}

pub fn network(code: &str, description: &str, stations: &[String]) -> String {
    format!(
        r#"<Network code="{code}">{}{}</Network>"#,
        leaf("Description", description),
        stations.join("")
    )
}

pub fn station(code: &str, channels: &[String]) -> String {
    format!(
        r#"<Station code="{code}">{}{}{}{}</Station>"#,
        leaf("Latitude", "50.764"),
        leaf("Longitude", "5.9317"),
        leaf("Elevation", "135"),
        channels.join("")
    )
}

/// Channel with a Response holding the given stages
pub fn channel(code: &str, location: &str, stages: &[String]) -> String {
    format!(
        r#"<Channel code="{code}" locationCode="{location}">{}<Response>{}</Response></Channel>"#,
        leaf("SampleRate", "40"),
        stages.join("")
    )
}

/// Channel without a Response element
pub fn bare_channel(code: &str, location: &str) -> String {
    format!(r#"<Channel code="{code}" locationCode="{location}"><SampleRate>40</SampleRate></Channel>"#)
}

pub fn stage_gain(value: &str) -> String {
    format!("<StageGain>{}</StageGain>", leaf("Value", value))
}

pub fn complex(tag: &str, real: f64, imaginary: f64) -> String {
    format!(
        "<{tag}>{}{}</{tag}>",
        leaf("Real", &real.to_string()),
        leaf("Imaginary", &imaginary.to_string())
    )
}

/// Poles/zeros stage with the given roots and gain
pub fn paz_stage(number: usize, zeros: &[(f64, f64)], poles: &[(f64, f64)], gain: &str) -> String {
    let zeros: String = zeros.iter().map(|(r, i)| complex("Zero", *r, *i)).collect();
    let poles: String = poles.iter().map(|(r, i)| complex("Pole", *r, *i)).collect();
    format!(
        r#"<Stage number="{number}"><PolesZeros>{}{}{}{}{}</PolesZeros>{}</Stage>"#,
        units("InputUnits", "m/s"),
        units("OutputUnits", "V"),
        leaf("PzTransferFunctionType", "LAPLACE (RADIANS/SECOND)"),
        zeros,
        poles,
        stage_gain(gain)
    )
}

pub fn fir_stage(number: usize, coefficients: &[f64]) -> String {
    let coefficients: String = coefficients
        .iter()
        .map(|c| leaf("NumeratorCoefficient", &c.to_string()))
        .collect();
    format!(
        r#"<Stage number="{number}"><FIR>{}{}{}{}</FIR>{}</Stage>"#,
        units("InputUnits", "counts"),
        units("OutputUnits", "counts"),
        leaf("Symmetry", "NONE"),
        coefficients,
        stage_gain("1")
    )
}

/// The NL.HGN.02.BHZ document used across tests
pub fn hgn_document() -> String {
    document(&[network(
        "NL",
        "Royal Netherlands Meteorological Institute (KNMI)",
        &[station(
            "HGN",
            &[channel("BHZ", "02", &[paz_stage(1, &[(0.0, 0.0)], &[], "1.0")])],
        )],
    )])
}
