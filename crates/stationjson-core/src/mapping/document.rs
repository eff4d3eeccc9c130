//! Document assembly: envelope plus networks

use super::context::ConversionContext;
use super::network::extract_network;
use super::scope::Scope;
use super::tags;
use crate::types::OutputDocument;
use crate::xml::XmlElement;
use crate::{Error, Result};

/// Build the output document from a parsed StationXML root
pub fn assemble(root: &XmlElement, context: &ConversionContext) -> Result<OutputDocument> {
    if !root.is(tags::NAMESPACE, tags::ROOT) {
        return Err(Error::UnexpectedRoot {
            found: root.qualified_name(),
            expected: tags::NAMESPACE.to_string(),
        });
    }

    let scope = Scope::root(root);
    let networks = scope
        .children(tags::NETWORK)
        .map(|network| extract_network(&network))
        .collect::<Result<Vec<_>>>()?;

    Ok(OutputDocument {
        schema_version: tags::SCHEMA_VERSION.to_string(),
        module: context.module.clone(),
        source: tags::SOURCE.to_string(),
        created: context.created_timestamp(),
        networks,
    })
}
