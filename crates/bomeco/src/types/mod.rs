//! The BoM entity model.
//!
//! Reference types identify records in the external MI database and live in
//! the Granta base-types namespace; everything else is BoM structure in the
//! versioned Eco namespace. All entities are plain mutable values with
//! structural equality; optional fields are `Option`, list fields default to
//! empty. No exclusivity validation is performed on choice-group fields
//! (for example `Material::percentage` vs `Material::mass`) - that contract
//! is documented, enforced server-side, and deliberately not re-checked
//! here.

mod bom;
mod refs;

pub use bom::*;
pub use refs::*;

/// Namespace URI of the BoM structural types.
pub const NAMESPACE_BOM_ECO: &str = "http://www.grantadesign.com/23/01/BillOfMaterialsEco";

/// Namespace URI of the record reference types.
pub const NAMESPACE_GRANTA_BASE_TYPES: &str = "http://www.grantadesign.com/12/05/GrantaBaseTypes";
