//! Schema-aware writer: the typed BoM model into generic documents.
//!
//! The mirror of [`crate::reader`]: one encode function per bound type,
//! emitting only fields whose values are set - absent optionals and empty
//! lists are omitted entirely, never written as empty elements. The
//! non-uniform shapes are handled inline by the owning type's function, in
//! the same places the reader decodes them.
//!
//! Record reference wrappers (`identity`, `lookupValue`) are written
//! whenever any of their members is populated, even if the combination is
//! incomplete, so the schema validation pass reports the problem instead of
//! the serialization silently dropping a populated value.

use crate::descriptor::{descriptor, TypeName};
use crate::schema::NamespaceMap;
use crate::types::*;
use crate::xml::Element;
use crate::{BomError, Result};
use std::fmt::Display;

const ECO: &str = NAMESPACE_BOM_ECO;
const GBT: &str = NAMESPACE_GRANTA_BASE_TYPES;

pub struct BomWriter<'a> {
    namespaces: &'a NamespaceMap,
}

impl<'a> BomWriter<'a> {
    pub fn new(namespaces: &'a NamespaceMap) -> Self {
        Self { namespaces }
    }

    /// Encode a BoM as a generic document rooted at the schema's root
    /// element. Serializing the result attaches the namespace declaration
    /// block derived from the same namespace map.
    pub fn bom_to_document(&self, bom: &BillOfMaterials, root_name: &str) -> Result<Element> {
        self.check_namespaces()?;
        let mut root = Element::new(ECO, root_name);
        self.push_list(&mut root, "Components", &bom.components, Self::write_part);
        self.push_list(
            &mut root,
            "TransportPhase",
            &bom.transport_phase,
            Self::write_transport_stage,
        );
        if let Some(use_phase) = &bom.use_phase {
            root.push(self.write_use_phase(use_phase));
        }
        if let Some(location) = &bom.location {
            root.push(self.write_location(location));
        }
        if let Some(notes) = &bom.notes {
            root.push(self.write_bom_details(notes));
        }
        self.push_list(
            &mut root,
            "Annotations",
            &bom.annotations,
            Self::write_annotation,
        );
        self.push_list(
            &mut root,
            "AnnotationSources",
            &bom.annotation_sources,
            Self::write_annotation_source,
        );
        push_opt_attr(&mut root, "id", &bom.internal_id);
        Ok(root)
    }

    // Mirror of the reader's precondition: refuse to encode against a
    // namespace map that cannot represent every bound type.
    fn check_namespaces(&self) -> Result<()> {
        for &type_name in TypeName::ALL {
            let namespace = descriptor(type_name).namespace;
            if self.namespaces.prefix_for(namespace).is_none() {
                return Err(BomError::UnregisteredNamespace {
                    namespace: namespace.to_string(),
                    context: type_name.as_str(),
                });
            }
        }
        Ok(())
    }

    fn write_part(&self, part: &Part) -> Element {
        let mut element = Element::new(ECO, "Part");
        self.push_opt_unitted(&mut element, "Quantity", &part.quantity);
        self.push_opt_unitted(&mut element, "MassPerUom", &part.mass_per_unit_of_measure);
        self.push_opt_unitted(
            &mut element,
            "VolumePerUom",
            &part.volume_per_unit_of_measure,
        );
        element.push(text_element(ECO, "PartNumber", &part.part_number));
        push_opt_text(&mut element, "Name", &part.part_name);
        push_opt_text(&mut element, "ExternalIdentity", &part.external_id);
        if let Some(reference) = &part.mi_part_reference {
            element.push(self.write_record_reference(ECO, "MIPartReference", reference));
        }
        if let Some(reference) = &part.non_mi_part_reference {
            let raw = match reference {
                NonMiPartReference::Text(text) => text.clone(),
                NonMiPartReference::Integer(value) => value.to_string(),
            };
            element.push(text_element(ECO, "NonMIPartReference", raw));
        }
        self.push_list(&mut element, "Components", &part.components, Self::write_part);
        self.push_list(
            &mut element,
            "Specifications",
            &part.specifications,
            Self::write_specification,
        );
        self.push_list(&mut element, "Materials", &part.materials, Self::write_material);
        self.push_list(&mut element, "Substances", &part.substances, Self::write_substance);
        self.push_list(&mut element, "Processes", &part.processes, Self::write_process);
        if !part.rohs_exemptions.is_empty() {
            let mut container = Element::new(ECO, "RohsExemptions");
            for exemption in &part.rohs_exemptions {
                container.push(text_element(ECO, "RohsExemption", exemption));
            }
            element.push(container);
        }
        self.push_list(
            &mut element,
            "EndOfLifeFates",
            &part.end_of_life_fates,
            Self::write_end_of_life_fate,
        );
        push_opt_attr(&mut element, "id", &part.internal_id);
        element
    }

    fn write_material(&self, material: &Material) -> Element {
        let mut element = Element::new(ECO, "Material");
        push_opt_scalar(&mut element, "Percentage", material.percentage);
        self.push_opt_unitted(&mut element, "Mass", &material.mass);
        element.push(self.write_record_reference(
            ECO,
            "MIMaterialReference",
            &material.mi_material_reference,
        ));
        // Recycle content is an exclusive choice: a typical-content flag, or
        // an explicit percentage when the flag is unset.
        if let Some(is_typical) = material.recycle_content_is_typical {
            let mut recycle_content = Element::new(ECO, "RecycleContent");
            recycle_content.push(text_element(ECO, "Typical", bool_text(is_typical)));
            element.push(recycle_content);
        } else if let Some(percentage) = material.recycle_content_percentage {
            let mut recycle_content = Element::new(ECO, "RecycleContent");
            recycle_content.push(text_element(ECO, "Percentage", percentage));
            element.push(recycle_content);
        }
        self.push_list(&mut element, "Processes", &material.processes, Self::write_process);
        self.push_list(
            &mut element,
            "EndOfLifeFates",
            &material.end_of_life_fates,
            Self::write_end_of_life_fate,
        );
        self.push_common_identifiers(
            &mut element,
            &material.identity,
            &material.name,
            &material.external_identity,
        );
        push_opt_attr(&mut element, "id", &material.internal_id);
        element
    }

    fn write_substance(&self, substance: &Substance) -> Element {
        let mut element = Element::new(ECO, "Substance");
        push_opt_scalar(&mut element, "Percentage", substance.percentage);
        push_opt_text(&mut element, "Category", &substance.category);
        element.push(self.write_record_reference(
            ECO,
            "MISubstanceReference",
            &substance.mi_substance_reference,
        ));
        self.push_common_identifiers(
            &mut element,
            &substance.identity,
            &substance.name,
            &substance.external_identity,
        );
        push_opt_attr(&mut element, "id", &substance.internal_id);
        element
    }

    fn write_process(&self, process: &Process) -> Element {
        let mut element = Element::new(ECO, "Process");
        element.push(self.write_record_reference(
            ECO,
            "MIProcessReference",
            &process.mi_process_reference,
        ));
        element.push(text_element(
            ECO,
            "DimensionType",
            process.dimension_type.as_xml(),
        ));
        push_opt_scalar(&mut element, "Percentage", process.percentage_of_part_affected);
        self.push_opt_unitted(&mut element, "Quantity", &process.quantity_affected);
        self.push_common_identifiers(
            &mut element,
            &process.identity,
            &process.name,
            &process.external_identity,
        );
        push_opt_attr(&mut element, "id", &process.internal_id);
        element
    }

    fn write_specification(&self, specification: &Specification) -> Element {
        let mut element = Element::new(ECO, "Specification");
        element.push(self.write_record_reference(
            ECO,
            "MISpecificationReference",
            &specification.mi_specification_reference,
        ));
        self.push_opt_unitted(&mut element, "Quantity", &specification.quantity);
        self.push_common_identifiers(
            &mut element,
            &specification.identity,
            &specification.name,
            &specification.external_identity,
        );
        push_opt_attr(&mut element, "id", &specification.internal_id);
        element
    }

    fn write_end_of_life_fate(&self, fate: &EndOfLifeFate) -> Element {
        let mut element = Element::new(ECO, "EndOfLifeFate");
        element.push(self.write_record_reference(
            ECO,
            "MIEndOfLifeReference",
            &fate.mi_end_of_life_reference,
        ));
        element.push(text_element(ECO, "Fraction", fate.fraction));
        element
    }

    fn write_transport_stage(&self, stage: &TransportStage) -> Element {
        let mut element = Element::new(ECO, "TransportStage");
        element.push(text_element(ECO, "Name", &stage.name));
        element.push(self.write_record_reference(
            ECO,
            "MITransportReference",
            &stage.mi_transport_reference,
        ));
        element.push(self.write_unitted_value("Distance", &stage.distance));
        push_opt_attr(&mut element, "id", &stage.internal_id);
        element
    }

    fn write_use_phase(&self, use_phase: &UsePhase) -> Element {
        let mut element = Element::new(ECO, "UsePhase");
        element.push(self.write_product_life_span(&use_phase.product_life_span));
        if let Some(mix) = &use_phase.electricity_mix {
            element.push(self.write_electricity_mix(mix));
        }
        if let Some(static_mode) = &use_phase.static_mode {
            element.push(self.write_static_mode(static_mode));
        }
        if let Some(mobile_mode) = &use_phase.mobile_mode {
            element.push(self.write_mobile_mode(mobile_mode));
        }
        element
    }

    fn write_product_life_span(&self, life_span: &ProductLifeSpan) -> Element {
        let mut element = Element::new(ECO, "ProductLifeSpan");
        element.push(text_element(ECO, "DurationYears", life_span.duration_years));
        push_opt_scalar(
            &mut element,
            "NumberOfFunctionalUnits",
            life_span.number_of_functional_units,
        );
        push_opt_text(
            &mut element,
            "FunctionalUnitDescription",
            &life_span.functional_unit_description,
        );
        if let Some(utility) = &life_span.utility {
            element.push(self.write_utility_specification(utility));
        }
        element
    }

    fn write_utility_specification(&self, utility: &UtilitySpecification) -> Element {
        let mut element = Element::new(ECO, "Utility");
        push_opt_scalar(
            &mut element,
            "IndustryAverageDurationYears",
            utility.industry_average_duration_years,
        );
        push_opt_scalar(
            &mut element,
            "IndustryAverageNumberOfFunctionalUnits",
            utility.industry_average_number_of_functional_units,
        );
        push_opt_scalar(&mut element, "Utility", utility.utility);
        element
    }

    fn write_electricity_mix(&self, mix: &ElectricityMix) -> Element {
        let mut element = Element::new(ECO, "ElectricityMix");
        if let Some(reference) = &mix.mi_region_reference {
            element.push(self.write_record_reference(ECO, "MIRegionReference", reference));
        }
        push_opt_scalar(
            &mut element,
            "PercentageFossilFuels",
            mix.percentage_fossil_fuels,
        );
        element
    }

    fn write_static_mode(&self, static_mode: &StaticMode) -> Element {
        let mut element = Element::new(ECO, "StaticMode");
        element.push(self.write_record_reference(
            ECO,
            "MIEnergyConversionReference",
            &static_mode.mi_energy_conversion_reference,
        ));
        element.push(self.write_unitted_value("PowerRating", &static_mode.power_rating));
        element.push(text_element(
            ECO,
            "DaysUsedPerYear",
            static_mode.days_used_per_year,
        ));
        element.push(text_element(
            ECO,
            "HoursUsedPerDay",
            static_mode.hours_used_per_day,
        ));
        element
    }

    fn write_mobile_mode(&self, mobile_mode: &MobileMode) -> Element {
        let mut element = Element::new(ECO, "MobileMode");
        element.push(self.write_record_reference(
            ECO,
            "MITransportReference",
            &mobile_mode.mi_transport_reference,
        ));
        element.push(text_element(
            ECO,
            "DaysUsedPerYear",
            mobile_mode.days_used_per_year,
        ));
        element.push(self.write_unitted_value(
            "DistanceTravelledPerDay",
            &mobile_mode.distance_travelled_per_day,
        ));
        element
    }

    fn write_location(&self, location: &Location) -> Element {
        let mut element = Element::new(ECO, "Location");
        if let Some(reference) = &location.mi_location_reference {
            element.push(self.write_record_reference(ECO, "MILocationReference", reference));
        }
        self.push_common_identifiers(
            &mut element,
            &location.identity,
            &location.name,
            &location.external_identity,
        );
        push_opt_attr(&mut element, "id", &location.internal_id);
        element
    }

    fn write_bom_details(&self, details: &BoMDetails) -> Element {
        let mut element = Element::new(ECO, "Notes");
        push_opt_text(&mut element, "Notes", &details.notes);
        push_opt_text(&mut element, "PictureUrl", &details.picture_url);
        push_opt_text(&mut element, "ProductName", &details.product_name);
        element
    }

    fn write_annotation(&self, annotation: &Annotation) -> Element {
        let mut element = Element::new(ECO, "Annotation");
        element.push(text_element(ECO, "targetId", &annotation.target_id));
        push_opt_text(&mut element, "sourceId", &annotation.source_id);
        element.push(text_element(ECO, "type", &annotation.annotation_type));
        match &annotation.value {
            AnnotationValue::Text(text) => element.push(text_element(ECO, "Text", text)),
            AnnotationValue::Quantity(quantity) => {
                element.push(self.write_unitted_value("Value", quantity))
            }
        }
        element
    }

    fn write_annotation_source(&self, source: &AnnotationSource) -> Element {
        let mut element = Element::new(ECO, "AnnotationSource");
        element.push(text_element(ECO, "Name", &source.name));
        push_opt_text(&mut element, "Method", &source.method);
        for data in &source.data {
            element.push(text_element(ECO, "Data", data));
        }
        push_opt_attr(&mut element, "id", &source.internal_id);
        element
    }

    fn write_unitted_value(&self, name: &str, value: &UnittedValue) -> Element {
        let mut element = Element::with_text(ECO, name, value.value.to_string());
        if let Some(unit) = &value.unit {
            element.set_attribute("Unit", unit.clone());
        }
        element
    }

    fn write_record_reference(
        &self,
        namespace: &str,
        name: &str,
        reference: &MiRecordReference,
    ) -> Element {
        let mut element = Element::new(namespace, name);
        element.push(text_element(GBT, "dbKey", &reference.db_key));
        // Written whenever any member is set, even if incomplete.
        if reference.record_history_identity.is_some()
            || reference.record_version_number.is_some()
        {
            let mut identity = Element::new(GBT, "identity");
            if let Some(history_identity) = reference.record_history_identity {
                identity.push(text_element(GBT, "recordHistoryIdentity", history_identity));
            }
            if let Some(version) = reference.record_version_number {
                identity.push(text_element(GBT, "version", version));
            }
            element.push(identity);
        }
        if let Some(guid) = &reference.record_guid {
            element.push(text_element(GBT, "recordGUID", guid));
        }
        if let Some(history_guid) = &reference.record_history_guid {
            element.push(text_element(GBT, "recordHistoryGUID", history_guid));
        }
        if reference.lookup_attribute_reference.is_some() || reference.lookup_value.is_some() {
            let mut lookup = Element::new(GBT, "lookupValue");
            if let Some(attribute_reference) = &reference.lookup_attribute_reference {
                lookup.push(self.write_attribute_reference(
                    GBT,
                    "attributeReference",
                    attribute_reference,
                ));
            }
            if let Some(value) = &reference.lookup_value {
                lookup.push(text_element(GBT, "attributeValue", value));
            }
            element.push(lookup);
        }
        push_opt_attr(&mut element, "recordUID", &reference.record_uid);
        element
    }

    fn write_attribute_reference(
        &self,
        namespace: &str,
        name: &str,
        reference: &MiAttributeReference,
    ) -> Element {
        let mut element = Element::new(namespace, name);
        element.push(text_element(GBT, "dbKey", &reference.db_key));
        if let Some(identity) = reference.attribute_identity {
            element.push(text_element(GBT, "attributeIdentity", identity));
        }
        if reference.table_reference.is_some()
            || reference.attribute_name.is_some()
            || reference.pseudo.is_some()
            || reference.is_standard.is_some()
        {
            let mut name_wrapper = Element::new(GBT, "name");
            if let Some(table) = &reference.table_reference {
                name_wrapper.push(self.write_partial_table_reference(table));
            }
            if let Some(attribute_name) = &reference.attribute_name {
                name_wrapper.push(text_element(GBT, "attributeName", attribute_name));
            }
            if let Some(pseudo) = reference.pseudo {
                name_wrapper.push(text_element(GBT, "pseudo", pseudo.as_xml()));
            }
            if let Some(is_standard) = reference.is_standard {
                name_wrapper.set_attribute("isStandard", bool_text(is_standard));
            }
            element.push(name_wrapper);
        }
        element
    }

    fn write_partial_table_reference(&self, table: &PartialTableReference) -> Element {
        let mut element = Element::new(GBT, "table");
        if let Some(identity) = table.table_identity {
            element.push(text_element(GBT, "tableIdentity", identity));
        }
        push_opt_text_ns(&mut element, GBT, "tableGuid", &table.table_guid);
        push_opt_text_ns(&mut element, GBT, "tableName", &table.table_name);
        element
    }

    fn push_common_identifiers(
        &self,
        element: &mut Element,
        identity: &Option<String>,
        name: &Option<String>,
        external_identity: &Option<String>,
    ) {
        push_opt_text(element, "Identity", identity);
        push_opt_text(element, "Name", name);
        push_opt_text(element, "ExternalIdentity", external_identity);
    }

    fn push_opt_unitted(&self, element: &mut Element, name: &str, value: &Option<UnittedValue>) {
        if let Some(value) = value {
            element.push(self.write_unitted_value(name, value));
        }
    }

    fn push_list<T>(
        &self,
        element: &mut Element,
        container: &str,
        items: &[T],
        write_item: fn(&Self, &T) -> Element,
    ) {
        if items.is_empty() {
            return;
        }
        let mut container_element = Element::new(ECO, container);
        for item in items {
            container_element.push(write_item(self, item));
        }
        element.push(container_element);
    }
}

fn text_element(namespace: &str, name: &str, value: impl Display) -> Element {
    Element::with_text(namespace, name, value.to_string())
}

fn push_opt_text(element: &mut Element, name: &str, value: &Option<String>) {
    push_opt_text_ns(element, ECO, name, value);
}

fn push_opt_text_ns(element: &mut Element, namespace: &str, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        element.push(Element::with_text(namespace, name, value.clone()));
    }
}

fn push_opt_scalar(element: &mut Element, name: &str, value: Option<f64>) {
    if let Some(value) = value {
        element.push(text_element(ECO, name, value));
    }
}

fn push_opt_attr(element: &mut Element, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        element.set_attribute(name, value.clone());
    }
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
