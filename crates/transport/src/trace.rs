//! Trace-string formatting for diagnostics.
//!
//! A transport declares an ordered list of [`TraceField`]s. Formatting walks
//! the list in order, looks up the current value of each field's attribute and
//! appends one `" label(value)"` segment per field.

use std::fmt::Write as _;

/// One entry in a transport's trace-field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceField {
    /// The name is both the printed label and the attribute to read.
    Name(&'static str),
    /// Prints `attribute`'s value under a different `label`.
    Labeled {
        /// Label printed in the trace output.
        label: &'static str,
        /// Attribute whose value is printed.
        attribute: &'static str,
    },
}

impl TraceField {
    /// The label printed in front of the value.
    pub fn label(self) -> &'static str {
        match self {
            TraceField::Name(name) => name,
            TraceField::Labeled { label, .. } => label,
        }
    }

    /// The attribute the value is read from.
    pub fn attribute(self) -> &'static str {
        match self {
            TraceField::Name(name) => name,
            TraceField::Labeled { attribute, .. } => attribute,
        }
    }
}

impl From<&'static str> for TraceField {
    fn from(name: &'static str) -> Self {
        TraceField::Name(name)
    }
}

impl From<(&'static str, &'static str)> for TraceField {
    fn from((label, attribute): (&'static str, &'static str)) -> Self {
        TraceField::Labeled { label, attribute }
    }
}

/// Formats `fields` in order, reading each value through `lookup`.
///
/// An attribute `lookup` does not know renders as an empty value.
pub(crate) fn format_trace<F>(fields: &[TraceField], lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::new();
    for field in fields {
        let value = lookup(field.attribute()).unwrap_or_else(|| {
            tracing::debug!(attribute = field.attribute(), "Unknown trace attribute");
            String::new()
        });
        // Writing into a String cannot fail.
        let _ = write!(output, " {}({})", field.label(), value);
    }
    output
}
