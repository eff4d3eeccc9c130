//! Station extraction

use super::channel::extract_channel;
use super::resolver::{resolve_float, resolve_text};
use super::scope::Scope;
use super::tags;
use crate::types::{Site, Station};
use crate::Result;
use tracing::debug;

/// Map one `Station` element and its channels
pub fn extract_station(station: &Scope<'_>) -> Result<Station> {
    let here = Some(station);

    let mut channels = Vec::new();
    let mut skipped = 0usize;
    for channel in station.children(tags::CHANNEL) {
        match extract_channel(&channel)? {
            Some(record) => channels.push(record),
            None => skipped += 1,
        }
    }

    let site = station.child(tags::SITE).map(|site| Site {
        name: resolve_text(Some(&site), tags::NAME),
        country: resolve_text(Some(&site), tags::COUNTRY),
    });

    debug!(
        path = station.path(),
        channels = channels.len(),
        skipped,
        "Mapped station"
    );

    Ok(Station {
        code: station.attribute(tags::ATTR_CODE),
        start_time: station.attribute(tags::ATTR_START_DATE),
        end_time: station.attribute(tags::ATTR_END_DATE),
        latitude: resolve_float(here, tags::LATITUDE)?,
        longitude: resolve_float(here, tags::LONGITUDE)?,
        elevation: resolve_float(here, tags::ELEVATION)?,
        site,
        restricted_status: station.attribute(tags::ATTR_RESTRICTED_STATUS),
        channels,
    })
}
