//! Output formatting and writing utilities
//!
//! Renders converted documents (indented JSON, compact JSON, YAML or a human
//! summary), validation failures and progress indicators.

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use stationjson_core::ConversionSummary;
use stationjson_schemas::ValidationError;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tracing::trace;

/// Default indentation of pretty JSON
pub const DEFAULT_INDENT: usize = 4;

/// Render a value in the given format
///
/// `indent` only affects [`OutputFormat::JsonPretty`] and the human fallback.
pub fn render<T: Serialize>(format: OutputFormat, value: &T, indent: usize) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(value)?),
        OutputFormat::JsonPretty | OutputFormat::Human => to_indented_json(value, indent),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

/// Serialize as JSON indented with `indent` spaces, with a trailing newline
pub fn to_indented_json<T: Serialize>(value: &T, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| Error::other(format!("Rendered JSON is not UTF-8: {}", e)))
}

/// Human-readable element counts
pub fn format_summary_human(summary: &ConversionSummary) -> String {
    format!(
        "Networks: {}\nStations: {}\nChannels: {}\nResponse stages: {}\n",
        summary.networks, summary.stations, summary.channels, summary.stages
    )
}

/// Human-readable validation failure, with violations when `detailed`
pub fn format_validation_error_human(error: &ValidationError, detailed: bool) -> String {
    let mut output = format!(
        "Validation failed at '{}': {}\n",
        error.path, error.message
    );

    if detailed {
        for violation in &error.schema_violations {
            output.push_str(&format!("  - {}\n", violation));
        }
    } else if !error.schema_violations.is_empty() {
        output.push_str(&format!(
            "  {} violation(s); rerun with --detailed to list them\n",
            error.violation_count()
        ));
    }

    output
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message (human format only)
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message (human format only)
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a document in the configured format
    pub fn document<T: Serialize>(&mut self, value: &T, indent: usize) -> Result<()> {
        let formatted = render(self.format, value, indent)?;
        trace!(bytes = formatted.len(), "Writing document");
        self.write_terminated(&formatted)
    }

    /// Write element counts
    pub fn summary(&mut self, summary: &ConversionSummary) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                let text = format_summary_human(summary);
                self.write(&text)
            }
            format => {
                let formatted = render(format, summary, DEFAULT_INDENT)?;
                self.write_terminated(&formatted)
            }
        }
    }

    /// Write a validation failure
    pub fn validation_error(&mut self, error: &ValidationError, detailed: bool) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                let text = format_validation_error_human(error, detailed);
                if self.use_color {
                    self.write(&text.red().to_string())
                } else {
                    self.write(&text)
                }
            }
            format => {
                let formatted = render(format, error, DEFAULT_INDENT)?;
                self.write_terminated(&formatted)
            }
        }
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    fn write_terminated(&mut self, content: &str) -> Result<()> {
        if content.ends_with('\n') {
            self.write(content)
        } else {
            self.writeln(content)
        }
    }
}

/// Spinner style used while fetching
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stationjson_schemas::{Rule, Violation};
    use std::sync::{Arc, Mutex};

    /// Writer that keeps everything written to it
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn writer(format: OutputFormat) -> (OutputWriter, Captured) {
        let captured = Captured::default();
        let writer = OutputWriter::with_writer(format, false, false, Box::new(captured.clone()));
        (writer, captured)
    }

    #[test]
    fn test_indented_json() {
        let value = json!({"networks": [{"code": "NL"}]});
        assert_eq!(
            to_indented_json(&value, 2).unwrap(),
            "{\n  \"networks\": [\n    {\n      \"code\": \"NL\"\n    }\n  ]\n}\n"
        );
        assert!(to_indented_json(&value, DEFAULT_INDENT)
            .unwrap()
            .contains("\n        {"));
    }

    #[test]
    fn test_render_formats() {
        let value = json!({"code": "NL"});
        assert_eq!(render(OutputFormat::Json, &value, 4).unwrap(), r#"{"code":"NL"}"#);
        assert_eq!(render(OutputFormat::Yaml, &value, 4).unwrap(), "code: NL\n");
    }

    #[test]
    fn test_document_compact_gets_newline() {
        let (mut out, captured) = writer(OutputFormat::Json);
        out.document(&json!({"a": 1}), 4).unwrap();
        assert_eq!(captured.text(), "{\"a\":1}\n");
    }

    #[test]
    fn test_human_summary() {
        let (mut out, captured) = writer(OutputFormat::Human);
        out.summary(&ConversionSummary {
            networks: 1,
            stations: 2,
            channels: 3,
            stages: 4,
        })
        .unwrap();
        assert_eq!(
            captured.text(),
            "Networks: 1\nStations: 2\nChannels: 3\nResponse stages: 4\n"
        );
    }

    #[test]
    fn test_messages_suppressed_outside_human() {
        let (mut out, captured) = writer(OutputFormat::JsonPretty);
        out.info("fetching").unwrap();
        out.success("done").unwrap();
        assert!(captured.text().is_empty());
    }

    #[test]
    fn test_validation_error_detail() {
        let error = ValidationError::with_violations(
            "$",
            "document does not match the StationJSON schema",
            vec![Violation::document(
                Rule::EpochOrder,
                "$.networks[0]",
                "startTime 2020-01-01T00:00:00 is after endTime 2010-01-01T00:00:00",
            )],
        );

        let brief = format_validation_error_human(&error, false);
        assert!(brief.contains("1 violation(s)"));

        let detailed = format_validation_error_human(&error, true);
        assert!(detailed.contains("  - [epoch_order] $.networks[0]: startTime 2020"));
    }
}
