//! Benchmarks for StationXML parsing and conversion
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stationjson_core::{xml::parse_document, Transformer};

const NS: &str = "http://www.fdsn.org/xml/station/1";

fn paz_stage(number: usize) -> String {
    let poles: String = (0..8)
        .map(|i| format!("<Pole><Real>-{i}.037</Real><Imaginary>0.037</Imaginary></Pole>"))
        .collect();
    format!(
        "<Stage number=\"{number}\"><PolesZeros><InputUnits><Name>m/s</Name></InputUnits>\
         <OutputUnits><Name>V</Name></OutputUnits>\
         <PzTransferFunctionType>LAPLACE (RADIANS/SECOND)</PzTransferFunctionType>\
         <Zero><Real>0</Real><Imaginary>0</Imaginary></Zero>{poles}</PolesZeros>\
         <StageGain><Value>1500</Value><Frequency>1</Frequency></StageGain></Stage>"
    )
}

fn fir_stage(number: usize) -> String {
    let coefficients: String = (0..64)
        .map(|i| format!("<NumeratorCoefficient i=\"{i}\">{}</NumeratorCoefficient>", 1.0 / (i as f64 + 1.0)))
        .collect();
    format!(
        "<Stage number=\"{number}\"><FIR><InputUnits><Name>counts</Name></InputUnits>\
         <OutputUnits><Name>counts</Name></OutputUnits><Symmetry>NONE</Symmetry>{coefficients}</FIR>\
         <Decimation><InputSampleRate>40</InputSampleRate><Factor>2</Factor><Offset>0</Offset>\
         <Delay>0</Delay><Correction>0</Correction></Decimation>\
         <StageGain><Value>1</Value><Frequency>1</Frequency></StageGain></Stage>"
    )
}

/// Build an inventory with `stations` stations of three channels each
fn create_inventory(stations: usize) -> String {
    let channel = |code: &str| {
        format!(
            "<Channel code=\"{code}\" locationCode=\"00\"><Latitude>50.7</Latitude>\
             <Longitude>5.9</Longitude><Elevation>135</Elevation><Depth>0</Depth>\
             <SampleRate>40</SampleRate><Response><InstrumentSensitivity><Value>6.0E8</Value>\
             <Frequency>1</Frequency><InputUnits><Name>m/s</Name></InputUnits></InstrumentSensitivity>\
             {}{}{}</Response></Channel>",
            paz_stage(1),
            fir_stage(2),
            fir_stage(3)
        )
    };
    let station: String = (0..stations)
        .map(|i| {
            format!(
                "<Station code=\"S{i:03}\"><Latitude>50.7</Latitude><Longitude>5.9</Longitude>\
                 <Elevation>135</Elevation>{}{}{}</Station>",
                channel("BHZ"),
                channel("BHN"),
                channel("BHE")
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\"?><FDSNStationXML xmlns=\"{NS}\" schemaVersion=\"1.1\">\
         <Source>bench</Source><Network code=\"NL\"><Description>bench</Description>{station}</Network>\
         </FDSNStationXML>"
    )
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for stations in [1, 10, 50] {
        let xml = create_inventory(stations);
        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(stations), &xml, |b, xml| {
            b.iter(|| parse_document(black_box(xml.as_bytes())))
        });
    }

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let transformer = Transformer::new().with_module("bench");

    for stations in [1, 10, 50] {
        let xml = create_inventory(stations);
        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(stations), &xml, |b, xml| {
            b.iter(|| transformer.convert(black_box(xml.as_bytes())))
        });
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let xml = create_inventory(10);
    let document = match Transformer::new().convert(xml.as_bytes()) {
        Ok(document) => document,
        Err(e) => panic!("benchmark inventory failed to convert: {e}"),
    };

    c.bench_function("serialize_10_stations", |b| {
        b.iter(|| serde_json::to_vec(black_box(&document)))
    });
}

criterion_group!(benches, bench_parse, bench_convert, bench_serialize);
criterion_main!(benches);
