//! The tool collaborator passed into every call.

/// A source of accumulated XMLSERVICE actions.
///
/// The transport core never inspects a tool; it borrows it for the duration of
/// one call and hands it to the channel, which asks it for the XML input
/// document. Building that document from individual actions is the tool's
/// business.
pub trait Toolkit {
    /// Returns the complete XMLSERVICE input document for the accumulated
    /// actions.
    fn xml_in(&self) -> String;
}

/// A tool carrying an already-built XMLSERVICE input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawXml(String);

impl RawXml {
    /// Wraps a pre-built XML document.
    pub fn new(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    /// Returns the wrapped document.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Toolkit for RawXml {
    fn xml_in(&self) -> String {
        self.0.clone()
    }
}
