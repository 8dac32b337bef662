//! Facade wiring schema validation to the reader and writer.

use crate::reader::BomReader;
use crate::schema::{NamespaceMap, Schema};
use crate::types::BillOfMaterials;
use crate::validate::{validate_document, ValidationMode};
use crate::writer::BomWriter;
use crate::{schemas, xml, BomError, Result};
use std::path::Path;

/// Handler for XML formatted BoMs. Supports reading from files and strings,
/// and serializing to string format.
///
/// The schema is parsed once at construction and shared read-only by every
/// subsequent operation. A handler is cheap to use repeatedly from one
/// caller; for concurrent use from several threads, give each caller its own
/// instance (or rely on `&self` sharing - the handler holds no interior
/// mutability).
pub struct BomHandler {
    schema: Schema,
    namespaces: NamespaceMap,
}

impl BomHandler {
    /// Creates a handler for the bundled 23/01 Eco BoM schema.
    pub fn new() -> Result<Self> {
        Ok(Self::with_schema(Schema::parse(schemas::BOM_SCHEMA_2301)?))
    }

    /// Creates a handler for an explicitly loaded schema, e.g. another Eco
    /// revision with the same structural types.
    pub fn with_schema(schema: Schema) -> Self {
        let namespaces = schema.document_namespaces();
        Self { schema, namespaces }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The namespace map built from the schema, with the target namespace as
    /// the default. Both the reader and the writer resolve against this map.
    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }

    /// Read a BoM from a file and return the corresponding
    /// [`BillOfMaterials`].
    pub fn load_bom_from_file(&self, file_path: &Path) -> Result<BillOfMaterials> {
        log::debug!("loading BoM from {}", file_path.display());
        let text = std::fs::read_to_string(file_path)?;
        self.load_bom_from_text(&text)
    }

    /// Read a BoM from a string and return the corresponding
    /// [`BillOfMaterials`].
    pub fn load_bom_from_text(&self, bom_text: &str) -> Result<BillOfMaterials> {
        let root = xml::parse(bom_text)?;
        let violations = validate_document(&root, &self.schema, ValidationMode::Decode);
        if !violations.is_empty() {
            return Err(BomError::InvalidDocument(violations));
        }
        let bom = BomReader::new(&self.namespaces).read_bom(&root)?;
        log::debug!("loaded BoM with {} root components", bom.components.len());
        Ok(bom)
    }

    /// Convert a [`BillOfMaterials`] into its XML string representation.
    pub fn dump_bom(&self, bom: &BillOfMaterials) -> Result<String> {
        let root = BomWriter::new(&self.namespaces).bom_to_document(bom, self.schema.root_element())?;
        let violations = validate_document(&root, &self.schema, ValidationMode::Encode);
        if !violations.is_empty() {
            return Err(BomError::InvalidDocument(violations));
        }
        xml::to_xml_string(&root, &self.namespaces)
    }
}
