//! Bundled XML Schema Definition (XSD) artifacts for the Eco BoM formats.
//!
//! These files are fixed, externally supplied artifacts; they can also be
//! used on their own to validate BoM XML with a full XSD validator.

/// The 23/01 Eco BoM schema (`http://www.grantadesign.com/23/01/BillOfMaterialsEco`).
pub const BOM_SCHEMA_2301: &str = include_str!("../schemas/BillOfMaterialsEco2301.xsd");

/// The Granta record base types schema imported by the BoM schemas
/// (`http://www.grantadesign.com/12/05/GrantaBaseTypes`).
pub const GRANTA_RECORD_1205: &str = include_str!("../schemas/grantarecord1205.xsd");
