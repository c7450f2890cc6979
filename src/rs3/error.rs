//! Error types for rs3 conversions

use std::fmt;

/// Error type for conversions between flat rs3 annotations and RST trees.
///
/// Every variant is fatal to the conversion of the current document; batch
/// callers are expected to catch per document and move on to the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum Rs3Error {
    /// A node's children are inconsistent with its nuclearity or relation type
    Structural(String),
    /// A group node has more children than the structure rules allow
    TooManyChildren(String),
    /// A group node has fewer children than the structure rules allow
    TooFewChildren(String),
    /// A recognized but deliberately unhandled structural pattern
    UnsupportedSchema(String),
    /// A relation name missing from the relation table (strict mode only)
    UnknownRelation(String),
    /// An element id with no record in the element table
    UnknownElement(String),
    /// A neighborhood lookup during encoding did not resolve uniquely
    InternalConsistency(String),
    /// A document could not be read or written in an interchange format
    Format(String),
}

impl fmt::Display for Rs3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rs3Error::Structural(msg) => write!(f, "Structural error: {}", msg),
            Rs3Error::TooManyChildren(msg) => write!(f, "Too many children: {}", msg),
            Rs3Error::TooFewChildren(msg) => write!(f, "Too few children: {}", msg),
            Rs3Error::UnsupportedSchema(msg) => write!(f, "Unsupported schema: {}", msg),
            Rs3Error::UnknownRelation(name) => write!(f, "Unknown relation name: {}", name),
            Rs3Error::UnknownElement(id) => write!(f, "Unknown element id: {}", id),
            Rs3Error::InternalConsistency(msg) => {
                write!(f, "Internal consistency error: {}", msg)
            }
            Rs3Error::Format(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

impl std::error::Error for Rs3Error {}
