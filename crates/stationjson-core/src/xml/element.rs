//! Owned, namespace-resolved XML element tree

/// One element of a parsed document
///
/// Names are stored split into the resolved namespace URI and the local
/// name, so lookups never depend on the prefix a producer happened to use.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Resolved namespace URI, `None` for unqualified elements
    pub namespace: Option<String>,

    /// Local name without prefix
    pub name: String,

    /// Unprefixed attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Element children in document order
    pub children: Vec<XmlElement>,

    /// Concatenated, trimmed text and CDATA content
    pub text: String,
}

impl XmlElement {
    /// Create an empty element
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether this element has the given namespace and local name
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// First child with the given qualified name
    pub fn child(&self, namespace: &str, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(namespace, name))
    }

    /// All children with the given qualified name, in document order
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is(namespace, name))
    }

    /// Value of an unprefixed attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// `{namespace}name` form, used in diagnostics
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{}}}{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    // Builder helpers, mostly for tests and fixtures

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}
