//! StationXML names used by the mapping
//!
//! Every element lookup is qualified with [`NAMESPACE`]; attributes are
//! unqualified in StationXML and matched by local name.

/// FDSN StationXML namespace URI
pub const NAMESPACE: &str = "http://www.fdsn.org/xml/station/1";

/// Version of the StationJSON schema produced
pub const SCHEMA_VERSION: &str = "1.0";

/// Value of the `source` field of every output document
pub const SOURCE: &str = "StationXML2StationJSON";

// Hierarchy
pub const ROOT: &str = "FDSNStationXML";
pub const NETWORK: &str = "Network";
pub const STATION: &str = "Station";
pub const CHANNEL: &str = "Channel";
pub const RESPONSE: &str = "Response";
pub const STAGE: &str = "Stage";

// Attributes
pub const ATTR_CODE: &str = "code";
pub const ATTR_START_DATE: &str = "startDate";
pub const ATTR_END_DATE: &str = "endDate";
pub const ATTR_RESTRICTED_STATUS: &str = "restrictedStatus";
pub const ATTR_LOCATION_CODE: &str = "locationCode";
pub const ATTR_NUMBER: &str = "number";

// Network / station / channel fields
pub const DESCRIPTION: &str = "Description";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const ELEVATION: &str = "Elevation";
pub const DEPTH: &str = "Depth";
pub const AZIMUTH: &str = "Azimuth";
pub const DIP: &str = "Dip";
pub const SAMPLE_RATE: &str = "SampleRate";
pub const SITE: &str = "Site";
pub const NAME: &str = "Name";
pub const COUNTRY: &str = "Country";
pub const SENSOR: &str = "Sensor";

// Response
pub const INSTRUMENT_SENSITIVITY: &str = "InstrumentSensitivity";
pub const INSTRUMENT_POLYNOMIAL: &str = "InstrumentPolynomial";
pub const VALUE: &str = "Value";
pub const FREQUENCY: &str = "Frequency";
pub const INPUT_UNITS: &str = "InputUnits";
pub const OUTPUT_UNITS: &str = "OutputUnits";

// Stage envelope
pub const STAGE_GAIN: &str = "StageGain";
pub const DECIMATION: &str = "Decimation";
pub const INPUT_SAMPLE_RATE: &str = "InputSampleRate";
pub const FACTOR: &str = "Factor";
pub const DELAY: &str = "Delay";
pub const CORRECTION: &str = "Correction";

// Stage payloads
pub const POLES_ZEROS: &str = "PolesZeros";
pub const COEFFICIENTS: &str = "Coefficients";
pub const FIR: &str = "FIR";
pub const RESPONSE_LIST: &str = "ResponseList";
pub const POLYNOMIAL: &str = "Polynomial";

// PolesZeros
pub const PZ_TRANSFER_FUNCTION_TYPE: &str = "PzTransferFunctionType";
pub const NORMALIZATION_FACTOR: &str = "NormalizationFactor";
pub const NORMALIZATION_FREQUENCY: &str = "NormalizationFrequency";
pub const ZERO: &str = "Zero";
pub const POLE: &str = "Pole";
pub const REAL: &str = "Real";
pub const IMAGINARY: &str = "Imaginary";

// Coefficients
pub const CF_TRANSFER_FUNCTION_TYPE: &str = "CfTransferFunctionType";
pub const NUMERATOR: &str = "Numerator";
pub const DENOMINATOR: &str = "Denominator";

// FIR
pub const SYMMETRY: &str = "Symmetry";
pub const NUMERATOR_COEFFICIENT: &str = "NumeratorCoefficient";

// ResponseList
pub const RESPONSE_LIST_ELEMENT: &str = "ResponseListElement";
pub const AMPLITUDE: &str = "Amplitude";
pub const PHASE: &str = "Phase";

// Polynomial
pub const APPROXIMATION_TYPE: &str = "ApproximationType";
pub const APPROXIMATION_LOWER_BOUND: &str = "ApproximationLowerBound";
pub const APPROXIMATION_UPPER_BOUND: &str = "ApproximationUpperBound";
pub const FREQUENCY_LOWER_BOUND: &str = "FrequencyLowerBound";
pub const FREQUENCY_UPPER_BOUND: &str = "FrequencyUpperBound";
pub const MAXIMUM_ERROR: &str = "MaximumError";
pub const COEFFICIENT: &str = "Coefficient";
