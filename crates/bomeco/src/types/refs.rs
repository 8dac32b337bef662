//! Record reference types.
//!
//! Value types identifying tables, attributes and records in the external MI
//! database. References are immutable by convention: no GUID or key format
//! validation is performed, and no check that only one identification mode
//! is populated - the service picks the highest-priority mode it finds.

/// A database pseudo-attribute: metadata addressed like a regular attribute
/// but not user-defined.
///
/// The wire form flips the case of the first letter (`Name` is written as
/// `name`, `RecordGUID` as `recordGUID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoAttribute {
    Name,
    ShortName,
    Subsets,
    ReleasedDate,
    ModifiedDate,
    RecordType,
    RecordHistoryIdentity,
    RecordColor,
    LinkedRecords,
    VersionState,
    RecordGuid,
    RecordHistoryGuid,
    RecordVersionNumber,
    TableName,
    ChildRecords,
    TableFilters,
}

impl PseudoAttribute {
    pub const ALL: &'static [PseudoAttribute] = &[
        PseudoAttribute::Name,
        PseudoAttribute::ShortName,
        PseudoAttribute::Subsets,
        PseudoAttribute::ReleasedDate,
        PseudoAttribute::ModifiedDate,
        PseudoAttribute::RecordType,
        PseudoAttribute::RecordHistoryIdentity,
        PseudoAttribute::RecordColor,
        PseudoAttribute::LinkedRecords,
        PseudoAttribute::VersionState,
        PseudoAttribute::RecordGuid,
        PseudoAttribute::RecordHistoryGuid,
        PseudoAttribute::RecordVersionNumber,
        PseudoAttribute::TableName,
        PseudoAttribute::ChildRecords,
        PseudoAttribute::TableFilters,
    ];

    /// Parse the wire form. Returns `None` for unknown values.
    pub fn from_xml(value: &str) -> Option<Self> {
        Some(match value {
            "name" => PseudoAttribute::Name,
            "shortName" => PseudoAttribute::ShortName,
            "subsets" => PseudoAttribute::Subsets,
            "releasedDate" => PseudoAttribute::ReleasedDate,
            "modifiedDate" => PseudoAttribute::ModifiedDate,
            "recordType" => PseudoAttribute::RecordType,
            "recordHistoryIdentity" => PseudoAttribute::RecordHistoryIdentity,
            "recordColor" => PseudoAttribute::RecordColor,
            "linkedRecords" => PseudoAttribute::LinkedRecords,
            "versionState" => PseudoAttribute::VersionState,
            "recordGUID" => PseudoAttribute::RecordGuid,
            "recordHistoryGUID" => PseudoAttribute::RecordHistoryGuid,
            "recordVersionNumber" => PseudoAttribute::RecordVersionNumber,
            "tableName" => PseudoAttribute::TableName,
            "childRecords" => PseudoAttribute::ChildRecords,
            "tableFilters" => PseudoAttribute::TableFilters,
            _ => return None,
        })
    }

    pub fn as_xml(self) -> &'static str {
        match self {
            PseudoAttribute::Name => "name",
            PseudoAttribute::ShortName => "shortName",
            PseudoAttribute::Subsets => "subsets",
            PseudoAttribute::ReleasedDate => "releasedDate",
            PseudoAttribute::ModifiedDate => "modifiedDate",
            PseudoAttribute::RecordType => "recordType",
            PseudoAttribute::RecordHistoryIdentity => "recordHistoryIdentity",
            PseudoAttribute::RecordColor => "recordColor",
            PseudoAttribute::LinkedRecords => "linkedRecords",
            PseudoAttribute::VersionState => "versionState",
            PseudoAttribute::RecordGuid => "recordGUID",
            PseudoAttribute::RecordHistoryGuid => "recordHistoryGUID",
            PseudoAttribute::RecordVersionNumber => "recordVersionNumber",
            PseudoAttribute::TableName => "tableName",
            PseudoAttribute::ChildRecords => "childRecords",
            PseudoAttribute::TableFilters => "tableFilters",
        }
    }
}

/// Partially identifies a table without specifying the MI database.
///
/// Usually just one of the fields should be provided; where more than one is
/// set, the consuming service uses the highest-priority one, in descending
/// order: `table_identity`, `table_guid`, `table_name`. All three are stored
/// independently here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialTableReference {
    /// The identity of the table. The fastest way to reference a table.
    pub table_identity: Option<u64>,
    /// The GUID of the table. Likely to be the most persistent way to refer
    /// to a table.
    pub table_guid: Option<String>,
    /// The name of the table. Table names can vary between localisations of
    /// a database, so this may not be safe if the database supports multiple
    /// locales.
    pub table_name: Option<String>,
}

/// Identifies an attribute in an MI database, either directly by identity or
/// indirectly by a name lookup that matches (only) the attribute.
///
/// Exactly one identification mode is meaningful per instance; this is a
/// documented convention, not a runtime invariant. In certain cases a
/// reference may match more than one attribute - depending on the operation
/// this may be legal or may produce a fault.
#[derive(Debug, Clone, PartialEq)]
pub struct MiAttributeReference {
    /// The key that uniquely identifies a particular database on the server.
    pub db_key: String,
    /// The identity of the attribute within the database.
    pub attribute_identity: Option<u64>,
    /// A reference to the table hosting the attribute. Required if
    /// `attribute_name` is specified and `is_standard` is not true.
    pub table_reference: Option<PartialTableReference>,
    /// Name of the attribute.
    pub attribute_name: Option<String>,
    /// The pseudo-attribute type if referring to a pseudo-attribute.
    pub pseudo: Option<PseudoAttribute>,
    /// If true, `attribute_name` is a standard name.
    pub is_standard: Option<bool>,
}

impl MiAttributeReference {
    pub fn new(db_key: impl Into<String>) -> Self {
        Self {
            db_key: db_key.into(),
            attribute_identity: None,
            table_reference: None,
            attribute_name: None,
            pseudo: None,
            is_standard: None,
        }
    }
}

/// Identifies a record in an MI database, either directly by identity or
/// GUID, or indirectly by a lookup that matches (only) the record.
///
/// For input, provide exactly one of `record_history_identity`,
/// `record_guid`, `record_history_guid` or the lookup pair. If more than one
/// is given the service uses the highest-priority one, in descending order:
/// identity, record GUID, record history GUID, lookup value. It does not
/// check that they all reference the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct MiRecordReference {
    /// The key that uniquely identifies a particular database on the server.
    pub db_key: String,
    /// The best-performing and highest-priority way to reference a record;
    /// identities might not be suitable for long-term persistence.
    pub record_history_identity: Option<u64>,
    /// If omitted, the latest version visible to the user is used. Only
    /// meaningful together with `record_history_identity`.
    pub record_version_number: Option<u64>,
    /// Identifies a particular version of a record by its GUID.
    pub record_guid: Option<String>,
    /// Identifies a record history; the latest visible version is resolved.
    /// `record_version_number` has no effect on history-GUID references.
    pub record_history_guid: Option<String>,
    /// Together with `lookup_value`, identifies a record by a unique
    /// short-text attribute. Specifies the attribute to look up.
    pub lookup_attribute_reference: Option<MiAttributeReference>,
    /// Together with `lookup_attribute_reference`, identifies a record by a
    /// unique short-text attribute. Non-unique values produce an error.
    pub lookup_value: Option<String>,
    /// Correlation token for the XML element representing this record. It is
    /// returned with responses unchanged and never interpreted; it does not
    /// represent any property of an actual record.
    pub record_uid: Option<String>,
}

impl MiRecordReference {
    pub fn new(db_key: impl Into<String>) -> Self {
        Self {
            db_key: db_key.into(),
            record_history_identity: None,
            record_version_number: None,
            record_guid: None,
            record_history_guid: None,
            lookup_attribute_reference: None,
            lookup_value: None,
            record_uid: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_attribute_round_trips_through_its_wire_form() {
        for &pseudo in PseudoAttribute::ALL {
            assert_eq!(PseudoAttribute::from_xml(pseudo.as_xml()), Some(pseudo));
        }
        assert_eq!(PseudoAttribute::ALL.len(), 16);
    }

    #[test]
    fn pseudo_attribute_wire_form_flips_the_first_letter() {
        assert_eq!(PseudoAttribute::Name.as_xml(), "name");
        assert_eq!(PseudoAttribute::RecordGuid.as_xml(), "recordGUID");
        assert_eq!(
            PseudoAttribute::from_xml("recordHistoryGUID"),
            Some(PseudoAttribute::RecordHistoryGuid)
        );
        assert_eq!(PseudoAttribute::from_xml("RecordGUID"), None);
    }

    #[test]
    fn references_are_structurally_comparable() {
        let mut a = MiRecordReference::new("MI_Restricted_Substances");
        let mut b = MiRecordReference::new("MI_Restricted_Substances");
        assert_eq!(a, b);
        a.record_history_identity = Some(123);
        assert_ne!(a, b);
        b.record_history_identity = Some(123);
        assert_eq!(a, b);
    }
}
