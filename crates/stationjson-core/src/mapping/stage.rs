//! Response stage classification and payload extraction
//!
//! A `Stage` carries a common gain/decimation envelope and at most one
//! payload element. Payloads are checked in a fixed precedence order and the
//! first one present wins; a stage without a recognised payload keeps only
//! its envelope.
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

use super::resolver::{float_sequence, resolve_float, resolve_text};
use super::scope::Scope;
use super::tags;
use crate::types::{
    Coefficients, Complex, Decimation, Fir, InstrumentPolynomial, PolesZeros, PolynomialStage,
    ResponseList, ResponseListItem, ResponseStage, StagePayload,
};
use crate::Result;
use tracing::trace;

/// Payload kinds a stage may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    PolesZeros,
    Coefficients,
    Fir,
    ResponseList,
    Polynomial,
}

impl StageKind {
    /// Probe order when a stage holds more than one payload element
    pub const PRECEDENCE: [StageKind; 5] = [
        StageKind::PolesZeros,
        StageKind::Coefficients,
        StageKind::Fir,
        StageKind::ResponseList,
        StageKind::Polynomial,
    ];

    /// StationXML element that carries this payload
    pub fn tag(self) -> &'static str {
        match self {
            StageKind::PolesZeros => tags::POLES_ZEROS,
            StageKind::Coefficients => tags::COEFFICIENTS,
            StageKind::Fir => tags::FIR,
            StageKind::ResponseList => tags::RESPONSE_LIST,
            StageKind::Polynomial => tags::POLYNOMIAL,
        }
    }
}

/// Find the payload element of a stage
pub fn classify<'a>(stage: &Scope<'a>) -> Option<(StageKind, Scope<'a>)> {
    StageKind::PRECEDENCE
        .iter()
        .find_map(|kind| stage.child(kind.tag()).map(|payload| (*kind, payload)))
}

/// Extract one stage: envelope, optional decimation and payload
pub fn extract_stage(stage: &Scope<'_>) -> Result<ResponseStage> {
    let gain = resolve_float(Some(stage), [tags::STAGE_GAIN, tags::VALUE])?;
    let gain_frequency = resolve_float(Some(stage), [tags::STAGE_GAIN, tags::FREQUENCY])?;

    let decimation = match stage.child(tags::DECIMATION) {
        Some(scope) => Some(extract_decimation(&scope)?),
        None => None,
    };

    let payload = match classify(stage) {
        Some((kind, scope)) => Some(extract_payload(kind, &scope)?),
        None => {
            trace!(path = stage.path(), "Stage has no recognised payload");
            None
        }
    };

    Ok(ResponseStage {
        gain,
        gain_frequency,
        decimation,
        payload,
    })
}

fn extract_payload(kind: StageKind, scope: &Scope<'_>) -> Result<StagePayload> {
    let payload = match kind {
        StageKind::PolesZeros => StagePayload::PolesZeros(extract_poles_zeros(scope)?),
        StageKind::Coefficients => StagePayload::Coefficients(extract_coefficients(scope)?),
        StageKind::Fir => StagePayload::Fir(extract_fir(scope)?),
        StageKind::ResponseList => StagePayload::ResponseList(extract_response_list(scope)?),
        StageKind::Polynomial => StagePayload::Polynomial(PolynomialStage {
            input_units: input_units(scope),
            output_units: output_units(scope),
            polynomial: extract_instrument_polynomial(scope)?,
        }),
    };
    Ok(payload)
}

fn input_units(scope: &Scope<'_>) -> Option<String> {
    resolve_text(Some(scope), [tags::INPUT_UNITS, tags::NAME])
}

fn output_units(scope: &Scope<'_>) -> Option<String> {
    resolve_text(Some(scope), [tags::OUTPUT_UNITS, tags::NAME])
}

fn extract_decimation(scope: &Scope<'_>) -> Result<Decimation> {
    Ok(Decimation {
        input_sample_rate: resolve_float(Some(scope), tags::INPUT_SAMPLE_RATE)?,
        factor: resolve_float(Some(scope), tags::FACTOR)?,
        delay: resolve_float(Some(scope), tags::DELAY)?,
        correction: resolve_float(Some(scope), tags::CORRECTION)?,
    })
}

fn extract_poles_zeros(scope: &Scope<'_>) -> Result<PolesZeros> {
    Ok(PolesZeros {
        input_units: input_units(scope),
        output_units: output_units(scope),
        transfer_function_type: resolve_text(Some(scope), tags::PZ_TRANSFER_FUNCTION_TYPE),
        normalization_factor: resolve_float(Some(scope), tags::NORMALIZATION_FACTOR)?,
        normalization_frequency: resolve_float(Some(scope), tags::NORMALIZATION_FREQUENCY)?,
        zeros: complex_sequence(scope, tags::ZERO)?,
        poles: complex_sequence(scope, tags::POLE)?,
    })
}

fn complex_sequence(scope: &Scope<'_>, tag: &'static str) -> Result<Vec<Complex>> {
    scope
        .children(tag)
        .map(|root| -> Result<Complex> {
            Ok(Complex(
                resolve_float(Some(&root), tags::REAL)?,
                resolve_float(Some(&root), tags::IMAGINARY)?,
            ))
        })
        .collect()
}

fn extract_coefficients(scope: &Scope<'_>) -> Result<Coefficients> {
    Ok(Coefficients {
        input_units: input_units(scope),
        output_units: output_units(scope),
        transfer_function_type: resolve_text(Some(scope), tags::CF_TRANSFER_FUNCTION_TYPE),
        numerator: float_sequence(scope, tags::NUMERATOR)?,
        denominator: float_sequence(scope, tags::DENOMINATOR)?,
    })
}

fn extract_fir(scope: &Scope<'_>) -> Result<Fir> {
    Ok(Fir {
        input_units: input_units(scope),
        output_units: output_units(scope),
        symmetry: resolve_text(Some(scope), tags::SYMMETRY),
        fir_coefficients: float_sequence(scope, tags::NUMERATOR_COEFFICIENT)?,
    })
}

fn extract_response_list(scope: &Scope<'_>) -> Result<ResponseList> {
    let items = scope
        .children(tags::RESPONSE_LIST_ELEMENT)
        .map(|item| -> Result<ResponseListItem> {
            Ok(ResponseListItem {
                frequency: resolve_float(Some(&item), tags::FREQUENCY)?,
                amplitude: resolve_float(Some(&item), tags::AMPLITUDE)?,
                phase: resolve_float(Some(&item), tags::PHASE)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ResponseList {
        input_units: input_units(scope),
        output_units: output_units(scope),
        items,
    })
}

/// Extract a polynomial description from either an `InstrumentPolynomial`
/// or a stage's `Polynomial` element
pub fn extract_instrument_polynomial(scope: &Scope<'_>) -> Result<InstrumentPolynomial> {
    Ok(InstrumentPolynomial {
        approximation: resolve_text(Some(scope), tags::APPROXIMATION_TYPE),
        approximation_lower_bound: resolve_float(Some(scope), tags::APPROXIMATION_LOWER_BOUND)?,
        approximation_upper_bound: resolve_float(Some(scope), tags::APPROXIMATION_UPPER_BOUND)?,
        frequency_lower_bound: resolve_float(Some(scope), tags::FREQUENCY_LOWER_BOUND)?,
        frequency_upper_bound: resolve_float(Some(scope), tags::FREQUENCY_UPPER_BOUND)?,
        maximum_error: resolve_float(Some(scope), tags::MAXIMUM_ERROR)?,
        coefficients: float_sequence(scope, tags::COEFFICIENT)?,
    })
}
