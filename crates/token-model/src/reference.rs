//! Alias reference parsing
//!
//! Stored values may point at other tokens with the wire syntax
//! `{dot.separated.path}`. The wire form is kept for interoperability, but a
//! reference is parsed once into path segments so that resolution never
//! re-splits strings.

use std::fmt;

/// A parsed alias reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    segments: Vec<String>,
}

impl Reference {
    /// Syntactic alias test: the value starts with `{` and ends with `}`.
    pub fn is_alias(value: &str) -> bool {
        value.starts_with('{') && value.ends_with('}')
    }

    /// Parse a stored value into a reference, or `None` for literals.
    pub fn parse(value: &str) -> Option<Self> {
        if !Self::is_alias(value) {
            return None;
        }
        let inner = &value[1..value.len() - 1];
        Some(Self {
            segments: inner.split('.').map(str::to_string).collect(),
        })
    }

    /// Build a reference from path segments.
    pub fn from_segments(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A reference into a global color family step, `{colors.<family>.<step>}`.
    pub fn color_step(family: &str, step: u16) -> Self {
        Self::from_segments(["colors".to_string(), family.to_string(), step.to_string()])
    }

    /// The path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The dotted path without braces, e.g. `colors.blue.70`.
    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for Reference {
    /// The wire form, e.g. `{colors.blue.70}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.path())
    }
}
