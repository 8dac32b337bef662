//! # Eco BoM XML binding
//!
//! Typed data model and schema-aware XML binding for the Granta "Eco" Bill of
//! Materials formats.
//!
//! A BoM document is a recursive hierarchy of parts, materials, substances and
//! processes, plus optional sustainability information (transport, use phase,
//! end-of-life fates) and a loosely-typed annotation mechanism. Record
//! reference types live in a shared base-types namespace, structural types in
//! a versioned BoM namespace; both are resolved dynamically against the
//! namespace map of the governing schema rather than against fixed prefixes.
//!
//! ## Overview
//!
//! - [`types`] - the BoM entity model ([`BillOfMaterials`], [`Part`],
//!   [`Material`], record references, ...)
//! - [`BomHandler`] - parses the bundled XSD once and exposes
//!   load-from-file/text and dump-to-string operations
//! - [`BomReader`] / [`BomWriter`] - the bidirectional binding between
//!   generic namespace-qualified documents and the typed model
//! - [`AttributeReferenceBuilder`] / [`RecordReferenceBuilder`] - fluent
//!   construction of record references with one identification mode
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use bomeco::BomHandler;
//!
//! let handler = BomHandler::new()?;
//! let bom = handler.load_bom_from_text(&xml_text)?;
//! println!("{} root components", bom.components.len());
//! let rendered = handler.dump_bom(&bom)?;
//! ```
//!
//! Decoding and encoding are pure, synchronous tree transforms: identical
//! input and namespace map produce identical output, list order is preserved,
//! and any failure aborts the whole operation. Schema violations are
//! collected and reported together, one message per violation.

mod builders;
mod descriptor;
mod handler;
mod reader;
mod schema;
mod validate;
mod writer;
mod xml;

pub mod schemas;
pub mod types;

pub use builders::{AttributeReferenceBuilder, RecordReferenceBuilder};
pub use handler::BomHandler;
pub use reader::BomReader;
pub use schema::{NamespaceMap, Schema};
pub use types::*;
pub use validate::{validate_document, ValidationMode, Violation};
pub use writer::BomWriter;
pub use xml::{Element, QName};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BomError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid schema: {0}")]
    Schema(String),

    /// The document (on decode) or the generated document (on encode) does
    /// not conform to the schema. Carries every violation found in the pass.
    #[error("BoM does not conform to the schema:\n{}", format_violations(.0))]
    InvalidDocument(Vec<Violation>),

    /// A bound type's namespace URI has no entry in the active namespace
    /// map. This indicates a mismatch between the binding metadata and the
    /// schema, not a problem with the input data.
    #[error("namespace '{namespace}' is not registered in the schema namespace map (required by {context})")]
    UnregisteredNamespace {
        namespace: String,
        context: &'static str,
    },

    #[error("XML serialization error: {0}")]
    XmlWrite(String),
}

pub type Result<T> = std::result::Result<T, BomError>;

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_violation() {
        let err = BomError::InvalidDocument(vec![
            Violation {
                path: "PartsEco/Components/Part[0]".to_string(),
                message: "missing required element 'PartNumber'".to_string(),
            },
            Violation {
                path: "PartsEco/Notes".to_string(),
                message: "unexpected element 'Remarks'".to_string(),
            },
        ]);
        let rendered = err.to_string();
        assert!(rendered.contains("missing required element 'PartNumber'"));
        assert!(rendered.contains("unexpected element 'Remarks'"));
    }
}
