//! Validate command handler

use super::utils::{load_validator, read_document};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use stationjson_schemas::{SchemaValidator, ValidationContext, ValidationMode};
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.file.display(), strict = ?args.strict))]
pub async fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &args.file.display().to_string());
    output.info(&format!("Validating {}", args.file.display()))?;

    let document = read_document(&args.file)?;
    let validator = load_validator(args.schema.as_deref(), config)?;

    let mode = ValidationMode::from(args.strict);
    debug!(%mode, "Using validation mode");

    let context = ValidationContext::new(mode);
    match validator.validate_with_context(&document, &context) {
        Ok(()) => {
            info!("Document is valid");
            output.success(&format!("✓ {} is valid StationJSON ({} mode)", args.file.display(), mode))
        }
        Err(error) => {
            warn!(violations = error.violation_count(), "Document failed validation");
            output.validation_error(&error, args.detailed)?;
            Err(error.into())
        }
    }
}
