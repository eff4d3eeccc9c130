//! Path resolution and scalar coercion
//!
//! A missing link anywhere along a tag path resolves to `None`; only a
//! located element whose text cannot be coerced is an error. This keeps
//! "absent" and "present but malformed" apart.
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

use super::scope::Scope;
use crate::{Error, Result};

/// A single tag or an ordered sequence of tags
pub trait TagPath {
    fn tags(&self) -> &[&str];
}

impl TagPath for &str {
    fn tags(&self) -> &[&str] {
        std::slice::from_ref(self)
    }
}

impl<const N: usize> TagPath for [&str; N] {
    fn tags(&self) -> &[&str] {
        self
    }
}

impl TagPath for &[&str] {
    fn tags(&self) -> &[&str] {
        self
    }
}

/// Locate the descendant at `path`, if every link exists
pub fn locate<'a>(scope: Option<&Scope<'a>>, path: impl TagPath) -> Option<Scope<'a>> {
    let mut current = scope?.clone();
    for tag in path.tags() {
        current = current.child(tag)?;
    }
    Some(current)
}

/// Resolve `path` and pass the located text through `coerce`
///
/// `coerce` receives the element text and the element location.
pub fn resolve_with<T, F>(scope: Option<&Scope<'_>>, path: impl TagPath, coerce: F) -> Result<Option<T>>
where
    F: FnOnce(&str, &str) -> Result<T>,
{
    match locate(scope, path) {
        Some(found) => coerce(found.text(), found.path()).map(Some),
        None => Ok(None),
    }
}

/// Text at `path`; an empty element is treated as absent
pub fn resolve_text(scope: Option<&Scope<'_>>, path: impl TagPath) -> Option<String> {
    locate(scope, path)
        .map(|found| found.text())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Finite float at `path`
pub fn resolve_float(scope: Option<&Scope<'_>>, path: impl TagPath) -> Result<Option<f64>> {
    resolve_with(scope, path, parse_float)
}

/// Parse element text as a finite float
pub fn parse_float(text: &str, path: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::malformed(path, text, "empty value where a number is expected"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|e: std::num::ParseFloatError| Error::malformed(path, text, e.to_string()))?;
    if !value.is_finite() {
        return Err(Error::malformed(path, text, "non-finite number"));
    }
    Ok(value)
}

/// Floats from the text of every child named `tag`, in document order
pub fn float_sequence(scope: &Scope<'_>, tag: &'static str) -> Result<Vec<f64>> {
    scope
        .children(tag)
        .map(|child| parse_float(child.text(), child.path()))
        .collect()
}
