//! Channel extraction

use super::resolver::{resolve_float, resolve_text};
use super::scope::Scope;
use super::stage::{extract_instrument_polynomial, extract_stage};
use super::tags;
use crate::types::Channel;
use crate::Result;
use tracing::trace;

/// Map one `Channel` element
///
/// Returns `Ok(None)` when the channel has no `Response`; such channels are
/// left out of the station's channel list.
pub fn extract_channel(channel: &Scope<'_>) -> Result<Option<Channel>> {
    let response = match channel.child(tags::RESPONSE) {
        Some(response) => response,
        None => {
            trace!(path = channel.path(), "Skipping channel without Response");
            return Ok(None);
        }
    };
    let here = Some(channel);

    let stages = response
        .children(tags::STAGE)
        .map(|stage| extract_stage(&stage))
        .collect::<Result<Vec<_>>>()?;

    let response_polynomial = match response.child(tags::INSTRUMENT_POLYNOMIAL) {
        Some(polynomial) => Some(extract_instrument_polynomial(&polynomial)?),
        None => None,
    };

    Ok(Some(Channel {
        location: channel.attribute(tags::ATTR_LOCATION_CODE),
        code: channel.attribute(tags::ATTR_CODE),
        start_time: channel.attribute(tags::ATTR_START_DATE),
        end_time: channel.attribute(tags::ATTR_END_DATE),
        latitude: resolve_float(here, tags::LATITUDE)?,
        longitude: resolve_float(here, tags::LONGITUDE)?,
        elevation: resolve_float(here, tags::ELEVATION)?,
        depth: resolve_float(here, tags::DEPTH)?,
        azimuth: resolve_float(here, tags::AZIMUTH)?,
        dip: resolve_float(here, tags::DIP)?,
        sensor_description: resolve_text(here, [tags::SENSOR, tags::DESCRIPTION]),
        sample_rate: resolve_float(here, tags::SAMPLE_RATE)?,
        scale: resolve_float(Some(&response), [tags::INSTRUMENT_SENSITIVITY, tags::VALUE])?,
        scale_units: resolve_text(
            Some(&response),
            [tags::INSTRUMENT_SENSITIVITY, tags::INPUT_UNITS, tags::NAME],
        ),
        scale_frequency: resolve_float(Some(&response), [tags::INSTRUMENT_SENSITIVITY, tags::FREQUENCY])?,
        restricted_status: channel.attribute(tags::ATTR_RESTRICTED_STATUS),
        response_stages: if stages.is_empty() { None } else { Some(stages) },
        response_polynomial,
    }))
}
