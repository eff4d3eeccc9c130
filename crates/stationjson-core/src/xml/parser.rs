//! Event-driven construction of the element tree with `quick-xml`

use super::element::XmlElement;
use crate::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use tracing::trace;

/// Parse a complete XML document into its root element
///
/// Comments, processing instructions, the XML declaration and DOCTYPE are
/// ignored. Text outside the root element is ignored as well.
pub fn parse_document(bytes: &[u8]) -> Result<XmlElement> {
    let mut reader = NsReader::from_reader(bytes);
    reader.config_mut().expand_empty_elements = true;

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let (resolved, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| malformed(e.to_string(), position))?;

        match event {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(malformed("content after the root element", position));
                }
                let namespace = namespace_of(resolved, position)?;
                stack.push(open_element(namespace, &start, position)?);
            }
            Event::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag", position))?;
                let trimmed = element.text.trim();
                if trimmed.len() != element.text.len() {
                    element.text = trimmed.to_string();
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| malformed(e.to_string(), position))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    let text = std::str::from_utf8(&data)
                        .map_err(|e| malformed(format!("invalid UTF-8 in CDATA: {}", e), position))?;
                    current.text.push_str(text);
                }
            }
            Event::Eof => break,
            // Decl, PI, Comment, DocType
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(malformed(
            format!("unclosed element '{}'", open.name),
            reader.buffer_position() as u64,
        ));
    }

    let root = root.ok_or_else(|| malformed("document has no root element", 0))?;
    trace!(root = %root.qualified_name(), "Parsed XML document");
    Ok(root)
}

fn open_element(namespace: Option<String>, start: &BytesStart<'_>, position: u64) -> Result<XmlElement> {
    let name = std::str::from_utf8(start.local_name().as_ref())
        .map_err(|e| malformed(format!("invalid UTF-8 in element name: {}", e), position))?
        .to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| malformed(e.to_string(), position))?;
        if attr.key.as_namespace_binding().is_some() || attr.key.prefix().is_some() {
            continue;
        }
        let key = std::str::from_utf8(attr.key.local_name().as_ref())
            .map_err(|e| malformed(format!("invalid UTF-8 in attribute name: {}", e), position))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| malformed(e.to_string(), position))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        namespace,
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn namespace_of(resolved: ResolveResult<'_>, position: u64) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => std::str::from_utf8(ns.as_ref())
            .map(|s| Some(s.to_string()))
            .map_err(|e| malformed(format!("invalid UTF-8 in namespace: {}", e), position)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(malformed(
            format!("unknown namespace prefix '{}'", String::from_utf8_lossy(&prefix)),
            position,
        )),
    }
}

fn malformed(message: impl Into<String>, position: u64) -> Error {
    Error::MalformedXml {
        message: message.into(),
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://www.fdsn.org/xml/station/1";

    #[test]
    fn test_parse_default_namespace() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<FDSNStationXML xmlns="{NS}" schemaVersion="1.1">
  <!-- comment -->
  <Source>ORFEUS</Source>
  <Network code="NL"><Description> Royal </Description></Network>
</FDSNStationXML>"#
        );
        let root = parse_document(xml.as_bytes()).unwrap();

        assert!(root.is(NS, "FDSNStationXML"));
        assert_eq!(root.attribute("schemaVersion"), Some("1.1"));
        assert!(root.attribute("xmlns").is_none());
        assert_eq!(root.children.len(), 2);

        let network = root.child(NS, "Network").unwrap();
        assert_eq!(network.attribute("code"), Some("NL"));
        assert_eq!(network.child(NS, "Description").unwrap().text(), "Royal");
    }

    #[test]
    fn test_parse_prefixed_namespace_and_empty_elements() {
        let xml = format!(r#"<s:Root xmlns:s="{NS}"><s:Empty/><Plain>x</Plain></s:Root>"#);
        let root = parse_document(xml.as_bytes()).unwrap();

        assert!(root.is(NS, "Root"));
        assert!(root.child(NS, "Empty").is_some());
        assert_eq!(root.child(NS, "Empty").unwrap().text(), "");
        assert!(root.child(NS, "Plain").is_none());
        assert_eq!(root.children[1].namespace, None);
    }

    #[test]
    fn test_parse_entities_and_cdata() {
        let xml = r#"<Root><A>a &amp; b</A><B><![CDATA[1.5]]></B></Root>"#;
        let root = parse_document(xml.as_bytes()).unwrap();
        assert_eq!(root.children[0].text(), "a & b");
        assert_eq!(root.children[1].text(), "1.5");
    }

    #[test]
    fn test_mismatched_tags_are_malformed() {
        let err = parse_document(b"<Root><A></B></Root>").unwrap_err();
        assert!(matches!(err, Error::MalformedXml { .. }));
    }

    #[test]
    fn test_unclosed_and_empty_documents() {
        assert!(matches!(
            parse_document(b"<Root><A>").unwrap_err(),
            Error::MalformedXml { .. }
        ));
        assert!(matches!(
            parse_document(b"   ").unwrap_err(),
            Error::MalformedXml { .. }
        ));
    }

    #[test]
    fn test_unknown_prefix_is_malformed() {
        let err = parse_document(b"<x:Root/>").unwrap_err();
        assert!(matches!(err, Error::MalformedXml { .. }));
    }
}
