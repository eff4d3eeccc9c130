//! Network extraction

use super::scope::Scope;
use super::station::extract_station;
use super::tags;
use crate::types::Network;
use crate::{Error, Result};
use tracing::debug;

/// Map one `Network` element and its stations
///
/// `Description` is required; an empty element maps to an empty string.
pub fn extract_network(network: &Scope<'_>) -> Result<Network> {
    // An empty <Description/> is "" rather than null; only absence is an error
    let description = network
        .child(tags::DESCRIPTION)
        .map(|d| d.text().to_string())
        .ok_or_else(|| Error::missing(network.path(), tags::DESCRIPTION))?;

    let stations = network
        .children(tags::STATION)
        .map(|station| extract_station(&station))
        .collect::<Result<Vec<_>>>()?;

    debug!(path = network.path(), stations = stations.len(), "Mapped network");

    Ok(Network {
        code: network.attribute(tags::ATTR_CODE),
        start_time: network.attribute(tags::ATTR_START_DATE),
        end_time: network.attribute(tags::ATTR_END_DATE),
        description,
        restricted_status: network.attribute(tags::ATTR_RESTRICTED_STATUS),
        stations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::tags::NAMESPACE;
    use crate::xml::XmlElement;

    fn el(name: &str) -> XmlElement {
        XmlElement::new(Some(NAMESPACE), name)
    }

    #[test]
    fn test_missing_description_is_fatal() {
        let element = el("Network").with_attribute("code", "NL");
        let root = el("FDSNStationXML").with_child(element);
        let scope = Scope::root(&root);
        let network = scope.children(tags::NETWORK).next().unwrap();

        match extract_network(&network).unwrap_err() {
            Error::MissingRequired { path, tag } => {
                assert_eq!(path, "FDSNStationXML/Network[NL]");
                assert_eq!(tag, "Description");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_description_is_empty_string() {
        let element = el("Network")
            .with_attribute("code", "NL")
            .with_attribute("startDate", "1993-01-01T00:00:00")
            .with_child(el("Description"));
        let network = extract_network(&Scope::root(&element)).unwrap();
        assert_eq!(network.description, "");
        assert_eq!(network.start_time.as_deref(), Some("1993-01-01T00:00:00"));
        assert!(network.stations.is_empty());
    }
}
