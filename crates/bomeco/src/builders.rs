//! Fluent builders for record and attribute references.
//!
//! Each builder walks through exactly one identification mode, so the built
//! reference has that mode's fields populated and nothing else. The
//! intermediate builder types make skipping a required step a compile error
//! rather than a runtime surprise.

use crate::types::{
    MiAttributeReference, MiRecordReference, PartialTableReference, PseudoAttribute,
};

/// Creates an [`MiAttributeReference`] with a valid combination of
/// properties.
#[derive(Debug)]
pub struct AttributeReferenceBuilder {
    inner: MiAttributeReference,
}

impl AttributeReferenceBuilder {
    /// Start building a reference to an attribute in the database identified
    /// by `db_key`.
    pub fn new(db_key: impl Into<String>) -> Self {
        Self {
            inner: MiAttributeReference::new(db_key),
        }
    }

    /// Identify the attribute by its identity.
    pub fn with_attribute_identity(mut self, attribute_identity: u64) -> FinalAttributeReference {
        self.inner.attribute_identity = Some(attribute_identity);
        FinalAttributeReference { inner: self.inner }
    }

    /// Identify the attribute as a specific pseudo-attribute.
    pub fn as_pseudo_attribute(mut self, pseudo: PseudoAttribute) -> FinalAttributeReference {
        self.inner.pseudo = Some(pseudo);
        FinalAttributeReference { inner: self.inner }
    }

    /// Identify the attribute by name, which may be a standard name. The
    /// hosting table must be specified next.
    pub fn with_attribute_name(
        mut self,
        attribute_name: impl Into<String>,
        is_standard_name: bool,
    ) -> AttributeReferenceByName {
        self.inner.attribute_name = Some(attribute_name.into());
        self.inner.is_standard = Some(is_standard_name);
        AttributeReferenceByName { inner: self.inner }
    }
}

/// Second step of a by-name attribute reference: specifying the table.
#[derive(Debug)]
pub struct AttributeReferenceByName {
    inner: MiAttributeReference,
}

impl AttributeReferenceByName {
    pub fn with_table_name(self, table_name: impl Into<String>) -> FinalAttributeReference {
        self.with_table(PartialTableReference {
            table_name: Some(table_name.into()),
            ..Default::default()
        })
    }

    pub fn with_table_identity(self, table_identity: u64) -> FinalAttributeReference {
        self.with_table(PartialTableReference {
            table_identity: Some(table_identity),
            ..Default::default()
        })
    }

    pub fn with_table_guid(self, table_guid: impl Into<String>) -> FinalAttributeReference {
        self.with_table(PartialTableReference {
            table_guid: Some(table_guid.into()),
            ..Default::default()
        })
    }

    fn with_table(mut self, table_reference: PartialTableReference) -> FinalAttributeReference {
        self.inner.table_reference = Some(table_reference);
        FinalAttributeReference { inner: self.inner }
    }
}

#[derive(Debug)]
pub struct FinalAttributeReference {
    inner: MiAttributeReference,
}

impl FinalAttributeReference {
    pub fn build(self) -> MiAttributeReference {
        self.inner
    }
}

/// Creates an [`MiRecordReference`] with a valid combination of properties.
#[derive(Debug)]
pub struct RecordReferenceBuilder {
    inner: MiRecordReference,
}

impl RecordReferenceBuilder {
    /// Start building a reference to a record in the database identified by
    /// `db_key`.
    pub fn new(db_key: impl Into<String>) -> Self {
        Self {
            inner: MiRecordReference::new(db_key),
        }
    }

    /// Annotate the reference with a correlation token, returned with
    /// responses unchanged.
    pub fn with_record_uid(mut self, record_uid: impl Into<String>) -> Self {
        self.inner.record_uid = Some(record_uid.into());
        self
    }

    /// Identify the record by its history identity; the latest released
    /// version visible to the user is resolved.
    pub fn with_record_history_id(mut self, record_history_id: u64) -> FinalRecordReference {
        self.inner.record_history_identity = Some(record_history_id);
        FinalRecordReference { inner: self.inner }
    }

    /// Identify the record by its history identity and a specific version
    /// number in a version-controlled table.
    pub fn with_record_history_id_and_version(
        mut self,
        record_history_id: u64,
        record_version_number: u64,
    ) -> FinalRecordReference {
        self.inner.record_history_identity = Some(record_history_id);
        self.inner.record_version_number = Some(record_version_number);
        FinalRecordReference { inner: self.inner }
    }

    /// Identify the record by its GUID; this specifies an exact version if
    /// the table is version-controlled.
    pub fn with_record_guid(mut self, record_guid: impl Into<String>) -> FinalRecordReference {
        self.inner.record_guid = Some(record_guid.into());
        FinalRecordReference { inner: self.inner }
    }

    /// Identify the record by its history GUID; the latest released version
    /// is resolved. Use [`Self::with_record_guid`] for a specific version.
    pub fn with_record_history_guid(
        mut self,
        record_history_guid: impl Into<String>,
    ) -> FinalRecordReference {
        self.inner.record_history_guid = Some(record_history_guid.into());
        FinalRecordReference { inner: self.inner }
    }

    /// Identify the record by a unique value on a short-text attribute or a
    /// compatible pseudo-attribute. A non-unique value produces an error
    /// server-side.
    pub fn with_lookup_value(
        mut self,
        lookup_value: impl Into<String>,
        lookup_attribute_reference: MiAttributeReference,
    ) -> FinalRecordReference {
        self.inner.lookup_value = Some(lookup_value.into());
        self.inner.lookup_attribute_reference = Some(lookup_attribute_reference);
        FinalRecordReference { inner: self.inner }
    }
}

#[derive(Debug)]
pub struct FinalRecordReference {
    inner: MiRecordReference,
}

impl FinalRecordReference {
    pub fn build(self) -> MiRecordReference {
        self.inner
    }
}
