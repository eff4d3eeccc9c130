//! StationJSON document model
//!
//! These records are the output side of the mapping. Every optional scalar is
//! serialized (as `null` when absent) so consumers can rely on a fixed key set;
//! only `decimation`, `responseStages`, `responsePolynomial` and the stage
//! payload keys are omitted when absent.

use serde::{Deserialize, Serialize};

/// Top-level StationJSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDocument {
    /// Version of the StationJSON schema this document conforms to
    pub schema_version: String,

    /// Identifier of the producing module, if configured
    pub module: Option<String>,

    /// Name of the producing converter
    pub source: String,

    /// Conversion time, RFC 3339 UTC with millisecond precision
    pub created: String,

    /// Networks in document order
    pub networks: Vec<Network>,
}

/// A seismic network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub code: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,

    /// Required in the source document; an empty element maps to `""`
    pub description: String,

    pub restricted_status: Option<String>,
    pub stations: Vec<Station>,
}

/// A station within a network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub code: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub site: Option<Site>,
    pub restricted_status: Option<String>,

    /// Only channels that carry a `Response` element
    pub channels: Vec<Channel>,
}

/// Station site description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: Option<String>,
    pub country: Option<String>,
}

/// A recording channel with its instrument response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub location: Option<String>,
    pub code: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    pub depth: Option<f64>,
    pub azimuth: Option<f64>,
    pub dip: Option<f64>,
    pub sensor_description: Option<String>,
    pub sample_rate: Option<f64>,

    /// Overall sensitivity (`InstrumentSensitivity/Value`)
    pub scale: Option<f64>,

    /// Input units of the overall sensitivity
    pub scale_units: Option<String>,

    /// Frequency at which `scale` is valid
    pub scale_frequency: Option<f64>,

    pub restricted_status: Option<String>,

    /// Present only when the response has at least one stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_stages: Option<Vec<ResponseStage>>,

    /// Present only when the response has an `InstrumentPolynomial`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_polynomial: Option<InstrumentPolynomial>,
}

/// One stage of a channel's response chain
///
/// The envelope fields are always present. The payload is flattened into the
/// same object and carries the `type` discriminator; a stage with no
/// recognised payload serializes without a `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStage {
    pub gain: Option<f64>,
    pub gain_frequency: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimation: Option<Decimation>,

    #[serde(flatten)]
    pub payload: Option<StagePayload>,
}

impl ResponseStage {
    /// The `type` discriminator of the payload, if any
    pub fn kind(&self) -> Option<&'static str> {
        self.payload.as_ref().map(StagePayload::kind)
    }
}

/// Stage payload variants, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StagePayload {
    #[serde(rename = "paz")]
    PolesZeros(PolesZeros),

    #[serde(rename = "coefficients")]
    Coefficients(Coefficients),

    #[serde(rename = "fir")]
    Fir(Fir),

    #[serde(rename = "responseList")]
    ResponseList(ResponseList),

    #[serde(rename = "polynomial")]
    Polynomial(PolynomialStage),
}

impl StagePayload {
    /// Serialized discriminator value
    pub fn kind(&self) -> &'static str {
        match self {
            StagePayload::PolesZeros(_) => "paz",
            StagePayload::Coefficients(_) => "coefficients",
            StagePayload::Fir(_) => "fir",
            StagePayload::ResponseList(_) => "responseList",
            StagePayload::Polynomial(_) => "polynomial",
        }
    }
}

/// Poles and zeros transfer function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolesZeros {
    pub input_units: Option<String>,
    pub output_units: Option<String>,
    pub transfer_function_type: Option<String>,
    pub normalization_factor: Option<f64>,
    pub normalization_frequency: Option<f64>,
    pub zeros: Vec<Complex>,
    pub poles: Vec<Complex>,
}

/// Coefficient (numerator/denominator) transfer function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coefficients {
    pub input_units: Option<String>,
    pub output_units: Option<String>,
    pub transfer_function_type: Option<String>,
    pub numerator: Vec<f64>,
    pub denominator: Vec<f64>,
}

/// FIR filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fir {
    pub input_units: Option<String>,
    pub output_units: Option<String>,
    pub symmetry: Option<String>,
    pub fir_coefficients: Vec<f64>,
}

/// Tabulated frequency response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseList {
    pub input_units: Option<String>,
    pub output_units: Option<String>,
    pub items: Vec<ResponseListItem>,
}

/// One row of a response list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseListItem {
    pub frequency: Option<f64>,
    pub amplitude: Option<f64>,
    pub phase: Option<f64>,
}

/// Polynomial stage: units plus the full polynomial description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolynomialStage {
    pub input_units: Option<String>,
    pub output_units: Option<String>,

    #[serde(flatten)]
    pub polynomial: InstrumentPolynomial,
}

/// Polynomial approximation of a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentPolynomial {
    pub approximation: Option<String>,
    pub approximation_lower_bound: Option<f64>,
    pub approximation_upper_bound: Option<f64>,
    pub frequency_lower_bound: Option<f64>,
    pub frequency_upper_bound: Option<f64>,
    pub maximum_error: Option<f64>,
    pub coefficients: Vec<f64>,
}

/// Decimation parameters of a digital stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decimation {
    pub input_sample_rate: Option<f64>,
    pub factor: Option<f64>,
    pub delay: Option<f64>,
    pub correction: Option<f64>,
}

/// A complex number serialized as a `[real, imaginary]` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex(pub Option<f64>, pub Option<f64>);

impl Complex {
    pub fn real(&self) -> Option<f64> {
        self.0
    }

    pub fn imaginary(&self) -> Option<f64> {
        self.1
    }
}

/// Element counts of a converted document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub networks: usize,
    pub stations: usize,
    pub channels: usize,
    pub stages: usize,
}

impl OutputDocument {
    /// Count networks, stations, channels and response stages
    pub fn summary(&self) -> ConversionSummary {
        let mut summary = ConversionSummary {
            networks: self.networks.len(),
            ..Default::default()
        };
        for network in &self.networks {
            summary.stations += network.stations.len();
            for station in &network.stations {
                summary.channels += station.channels.len();
                summary.stages += station
                    .channels
                    .iter()
                    .map(|c| c.response_stages.as_ref().map_or(0, Vec::len))
                    .sum::<usize>();
            }
        }
        summary
    }
}
