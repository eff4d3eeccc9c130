//! Convert command handler

use super::utils::load_validator;
use crate::cli::{ConvertArgs, OutputFormat, QueryArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::{render, OutputWriter};
use stationjson_core::http::{StationClient, StationQuery};
use stationjson_core::{OutputDocument, Transformer};
use stationjson_schemas::SchemaValidator;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Where the StationXML comes from
#[derive(Debug, Clone, PartialEq)]
enum Source {
    File(PathBuf),
    Stdin,
    Url(String),
    Query(StationQuery),
}

impl Source {
    fn from_args(args: &ConvertArgs, config: &Config) -> Result<Self> {
        if let Some(input) = &args.input {
            return Ok(if input.as_os_str() == "-" {
                Source::Stdin
            } else {
                Source::File(input.clone())
            });
        }
        if let Some(url) = &args.url {
            return Ok(Source::Url(url.clone()));
        }
        if args.query.is_set() {
            return Ok(Source::Query(build_query(&args.query, config)));
        }
        Err(Error::invalid_args(
            "give an INPUT file (or - for stdin), --url, or --network query flags",
        ))
    }

    fn describe(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Stdin => "<stdin>".to_string(),
            Source::Url(url) => redaction::redact_url(url),
            Source::Query(query) => query
                .to_url()
                .map(|u| redaction::redact_url(u.as_str()))
                .unwrap_or_else(|_| query.base_url().to_string()),
        }
    }
}

fn build_query(args: &QueryArgs, config: &Config) -> StationQuery {
    let mut query = StationQuery::new().with_base_url(config.fetch.base_url.clone());
    if let Some(network) = &args.network {
        query = query.network(network.clone());
    }
    if let Some(station) = &args.station {
        query = query.station(station.clone());
    }
    if let Some(location) = &args.location {
        query = query.location(location.clone());
    }
    if let Some(channel) = &args.channel {
        query = query.channel(channel.clone());
    }
    if let Some(level) = args.level {
        query = query.level(level.into());
    }
    query
}

/// Handle the convert command
#[instrument(skip_all)]
pub async fn handle_convert(args: ConvertArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let source = Source::from_args(&args, config)?;
    let _timer = Timer::with_details("convert_command", &source.describe());
    info!(source = %source.describe(), "Starting conversion");

    let xml = read_source(&source, config, output).await?;
    debug!(bytes = xml.len(), "StationXML loaded");

    let mut transformer = Transformer::new();
    if let Some(module) = args.module.as_ref().or(config.conversion.module.as_ref()) {
        transformer = transformer.with_module(module.clone());
    }

    let document = {
        let _conversion_timer = Timer::new("conversion");
        transformer.convert(&xml)?
    };

    if args.validate || config.conversion.validate {
        validate_document(&document, config)?;
        output.info("Document is valid StationJSON")?;
    }

    if args.summary {
        return output.summary(&document.summary());
    }

    let indent = args.indent.unwrap_or(config.output.indent);
    match &args.save_to {
        Some(path) => {
            save_document(&document, path, output.format(), indent)?;
            output.success(&format!("✓ Wrote {}", path.display()))
        }
        None => output.document(&document, indent),
    }
}

async fn read_source(source: &Source, config: &Config, output: &OutputWriter) -> Result<Vec<u8>> {
    match source {
        Source::File(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound { path: path.clone() });
            }
            Ok(std::fs::read(path)?)
        }
        Source::Stdin => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Source::Url(url) => fetch_remote(url, config, output).await,
        Source::Query(query) => {
            let url = query.to_url()?;
            fetch_remote(url.as_str(), config, output).await
        }
    }
}

/// GET a StationXML document under a spinner
async fn fetch_remote(url: &str, config: &Config, output: &OutputWriter) -> Result<Vec<u8>> {
    let client = StationClient::new(config.client_config())?;

    let spinner = output.spinner(&format!("Fetching {}", redaction::redact_url(url)));
    let result = client.fetch(url).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok(result?)
}

fn validate_document(document: &OutputDocument, config: &Config) -> Result<()> {
    let _timer = Timer::new("schema_validation");
    let validator = load_validator(None, config)?;
    let value = serde_json::to_value(document)?;
    validator.validate(&value)?;
    Ok(())
}

/// Write the document to `path`; human output falls back to indented JSON
fn save_document(document: &OutputDocument, path: &Path, format: OutputFormat, indent: usize) -> Result<()> {
    let format = match format {
        OutputFormat::Human => OutputFormat::JsonPretty,
        other => other,
    };
    let mut text = render(format, document, indent)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use tempfile::TempDir;

    const HGN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FDSNStationXML xmlns="http://www.fdsn.org/xml/station/1" schemaVersion="1.1">
  <Source>test</Source>
  <Network code="NL">
    <Description>Netherlands Seismic Network</Description>
    <Station code="HGN">
      <Latitude>50.764</Latitude>
      <Longitude>5.9317</Longitude>
      <Elevation>135</Elevation>
    </Station>
  </Network>
</FDSNStationXML>
"#;

    fn convert_args(argv: &[&str]) -> ConvertArgs {
        let mut full = vec!["stationjson", "convert"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Convert(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_source_selection() {
        let config = Config::default();
        assert_eq!(
            Source::from_args(&convert_args(&["-"]), &config).unwrap(),
            Source::Stdin
        );
        assert_eq!(
            Source::from_args(&convert_args(&["in.xml"]), &config).unwrap(),
            Source::File(PathBuf::from("in.xml"))
        );
        assert!(matches!(
            Source::from_args(&convert_args(&["--network", "NL"]), &config).unwrap(),
            Source::Query(_)
        ));
        assert!(Source::from_args(&convert_args(&[]), &config)
            .unwrap_err()
            .should_show_help());
    }

    #[test]
    fn test_query_uses_configured_base_url() {
        let mut config = Config::default();
        config.fetch.base_url = "http://localhost:8080/fdsnws/station/1/query".to_string();
        let args = convert_args(&["--network", "NL", "--station", "HGN", "--level", "station"]);

        let url = build_query(&args.query, &config).to_url().unwrap();
        assert!(url.as_str().starts_with("http://localhost:8080/fdsnws/station/1/query?"));
        assert!(url.as_str().contains("net=NL"));
        assert!(url.as_str().contains("sta=HGN"));
        assert!(url.as_str().contains("level=station"));
    }

    #[tokio::test]
    async fn test_convert_file_and_save() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("hgn.xml");
        let target = dir.path().join("out/hgn.json");
        std::fs::write(&input, HGN).unwrap();

        let args = convert_args(&[
            input.to_str().unwrap(),
            "--module",
            "ORFEUS",
            "--validate",
            "--indent",
            "2",
            "--save-to",
            target.to_str().unwrap(),
        ]);
        let mut output = OutputWriter::with_writer(OutputFormat::JsonPretty, false, true, Box::new(std::io::sink()));
        handle_convert(args, &Config::default(), &mut output).await.unwrap();

        let text = std::fs::read_to_string(&target).unwrap();
        assert!(text.starts_with("{\n  \""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["module"], "ORFEUS");
        assert_eq!(value["networks"][0]["stations"][0]["code"], "HGN");
    }

    #[tokio::test]
    async fn test_convert_missing_file() {
        let args = convert_args(&["/nonexistent/inventory.xml"]);
        let mut output = OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()));
        let err = handle_convert(args, &Config::default(), &mut output).await.unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
