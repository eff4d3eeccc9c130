//! Element handle that remembers where it sits in the document

use super::tags;
use crate::xml::XmlElement;

/// A borrowed element together with its slash-separated location
///
/// The location is only used to report errors, e.g.
/// `FDSNStationXML/Network[NL]/Station[HGN]/Channel[02.BHZ]/Latitude`.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    element: &'a XmlElement,
    path: String,
}

impl<'a> Scope<'a> {
    /// Scope for a document root
    pub fn root(element: &'a XmlElement) -> Self {
        Self {
            element,
            path: element.name.clone(),
        }
    }

    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Trimmed text of the element
    pub fn text(&self) -> &'a str {
        self.element.text()
    }

    /// Owned attribute value
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.element.attribute(name).map(str::to_string)
    }

    /// First child in the StationXML namespace with the given tag
    pub fn child(&self, tag: &str) -> Option<Scope<'a>> {
        self.element.child(tags::NAMESPACE, tag).map(|element| Scope {
            element,
            path: format!("{}/{}", self.path, tag),
        })
    }

    /// Every child in the StationXML namespace with the given tag, labelled
    /// by code (or position) in its path
    pub fn children(&self, tag: &'static str) -> impl Iterator<Item = Scope<'a>> + 'a {
        let base = self.path.clone();
        self.element
            .children_named(tags::NAMESPACE, tag)
            .enumerate()
            .map(move |(index, element)| Scope {
                element,
                path: format!("{}/{}[{}]", base, tag, label(element, index)),
            })
    }

    /// Location of a descendant that may not exist
    pub fn join(&self, tags: &[&str]) -> String {
        let mut path = self.path.clone();
        for tag in tags {
            path.push('/');
            path.push_str(tag);
        }
        path
    }
}

fn label(element: &XmlElement, index: usize) -> String {
    if element.name == tags::CHANNEL {
        return format!(
            "{}.{}",
            element.attribute(tags::ATTR_LOCATION_CODE).unwrap_or(""),
            element.attribute(tags::ATTR_CODE).unwrap_or("?")
        );
    }
    element
        .attribute(tags::ATTR_CODE)
        .or_else(|| element.attribute(tags::ATTR_NUMBER))
        .map(str::to_string)
        .unwrap_or_else(|| (index + 1).to_string())
}
