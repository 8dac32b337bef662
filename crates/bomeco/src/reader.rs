//! Schema-aware reader: generic documents into the typed BoM model.
//!
//! A pure recursive transform with one decode function per bound type.
//! Regular shapes (scalar children, nested complex types, wrapped lists) go
//! through shared helpers; the non-uniform shapes - the record reference
//! `identity`/`lookupValue` wrappers, the attribute reference `name`
//! wrapper, `RecycleContent`, `RohsExemptions`, the annotation value choice -
//! are decoded inline by the owning type's function. Fields contributed by
//! the shared identifier groups are read through common helpers.
//!
//! The reader is expected to run on documents that already passed
//! [`crate::validate`]; it still reports any problem it finds itself as a
//! (single-entry) validation error rather than panicking.

use crate::descriptor::{descriptor, TypeName};
use crate::schema::NamespaceMap;
use crate::types::*;
use crate::validate::Violation;
use crate::xml::Element;
use crate::{BomError, Result};

const ECO: &str = NAMESPACE_BOM_ECO;
const GBT: &str = NAMESPACE_GRANTA_BASE_TYPES;

pub struct BomReader<'a> {
    namespaces: &'a NamespaceMap,
}

impl<'a> BomReader<'a> {
    pub fn new(namespaces: &'a NamespaceMap) -> Self {
        Self { namespaces }
    }

    /// Decode the root element of a schema-validated document.
    pub fn read_bom(&self, root: &Element) -> Result<BillOfMaterials> {
        self.check_namespaces()?;
        self.read_bill_of_materials(root)
    }

    // Every bound type's namespace must be resolvable against the active
    // namespace map before decoding starts; a miss is a metadata/schema
    // mismatch, not bad input data.
    fn check_namespaces(&self) -> Result<()> {
        for &type_name in TypeName::ALL {
            let namespace = descriptor(type_name).namespace;
            if !self.namespaces.contains_uri(namespace) {
                return Err(BomError::UnregisteredNamespace {
                    namespace: namespace.to_string(),
                    context: type_name.as_str(),
                });
            }
        }
        Ok(())
    }

    fn read_bill_of_materials(&self, element: &Element) -> Result<BillOfMaterials> {
        let mut bom =
            BillOfMaterials::new(self.read_list(element, "Components", "Part", Self::read_part)?);
        bom.transport_phase = self.read_list(
            element,
            "TransportPhase",
            "TransportStage",
            Self::read_transport_stage,
        )?;
        bom.use_phase = element
            .child(ECO, "UsePhase")
            .map(|child| self.read_use_phase(child))
            .transpose()?;
        bom.location = element
            .child(ECO, "Location")
            .map(|child| self.read_location(child))
            .transpose()?;
        bom.notes = element
            .child(ECO, "Notes")
            .map(|child| self.read_bom_details(child))
            .transpose()?;
        bom.annotations =
            self.read_list(element, "Annotations", "Annotation", Self::read_annotation)?;
        bom.annotation_sources = self.read_list(
            element,
            "AnnotationSources",
            "AnnotationSource",
            Self::read_annotation_source,
        )?;
        bom.internal_id = self.attr(element, "id");
        Ok(bom)
    }

    fn read_part(&self, element: &Element) -> Result<Part> {
        let mut part = Part::new(self.req_text(element, ECO, "PartNumber", "Part")?);
        part.quantity = self.opt_unitted(element, "Quantity")?;
        part.mass_per_unit_of_measure = self.opt_unitted(element, "MassPerUom")?;
        part.volume_per_unit_of_measure = self.opt_unitted(element, "VolumePerUom")?;
        part.part_name = self.opt_text(element, ECO, "Name");
        part.external_id = self.opt_text(element, ECO, "ExternalIdentity");
        part.mi_part_reference = self.opt_record_reference(element, "MIPartReference")?;
        // The schema types NonMIPartReference as a long-or-string union;
        // the integer member wins when the text parses.
        part.non_mi_part_reference =
            self.opt_text(element, ECO, "NonMIPartReference")
                .map(|raw| match raw.parse::<i64>() {
                    Ok(value) => NonMiPartReference::Integer(value),
                    Err(_) => NonMiPartReference::Text(raw),
                });
        part.components = self.read_list(element, "Components", "Part", Self::read_part)?;
        part.specifications = self.read_list(
            element,
            "Specifications",
            "Specification",
            Self::read_specification,
        )?;
        part.materials = self.read_list(element, "Materials", "Material", Self::read_material)?;
        part.substances = self.read_list(element, "Substances", "Substance", Self::read_substance)?;
        part.processes = self.read_list(element, "Processes", "Process", Self::read_process)?;
        if let Some(container) = element.child(ECO, "RohsExemptions") {
            part.rohs_exemptions = container
                .children_named(ECO, "RohsExemption")
                .map(|child| child.text_content().to_string())
                .collect();
        }
        part.end_of_life_fates = self.read_list(
            element,
            "EndOfLifeFates",
            "EndOfLifeFate",
            Self::read_end_of_life_fate,
        )?;
        part.internal_id = self.attr(element, "id");
        Ok(part)
    }

    fn read_material(&self, element: &Element) -> Result<Material> {
        let mut material =
            Material::new(self.req_record_reference(element, "MIMaterialReference", "Material")?);
        material.percentage = self.opt_f64(element, ECO, "Percentage")?;
        material.mass = self.opt_unitted(element, "Mass")?;
        if let Some(recycle_content) = element.child(ECO, "RecycleContent") {
            material.recycle_content_is_typical =
                self.opt_bool(recycle_content, ECO, "Typical")?;
            material.recycle_content_percentage =
                self.opt_f64(recycle_content, ECO, "Percentage")?;
        }
        material.processes = self.read_list(element, "Processes", "Process", Self::read_process)?;
        material.end_of_life_fates = self.read_list(
            element,
            "EndOfLifeFates",
            "EndOfLifeFate",
            Self::read_end_of_life_fate,
        )?;
        (material.identity, material.name, material.external_identity) =
            self.read_common_identifiers(element);
        material.internal_id = self.attr(element, "id");
        Ok(material)
    }

    fn read_substance(&self, element: &Element) -> Result<Substance> {
        let mut substance =
            Substance::new(self.req_record_reference(element, "MISubstanceReference", "Substance")?);
        substance.percentage = self.opt_f64(element, ECO, "Percentage")?;
        substance.category = self.opt_text(element, ECO, "Category");
        (substance.identity, substance.name, substance.external_identity) =
            self.read_common_identifiers(element);
        substance.internal_id = self.attr(element, "id");
        Ok(substance)
    }

    fn read_process(&self, element: &Element) -> Result<Process> {
        let dimension_raw = self.req_text(element, ECO, "DimensionType", "Process")?;
        let dimension_type = DimensionType::from_xml(&dimension_raw).ok_or_else(|| {
            self.invalid("Process", format!("invalid dimension type '{dimension_raw}'"))
        })?;
        let mut process = Process::new(
            self.req_record_reference(element, "MIProcessReference", "Process")?,
            dimension_type,
        );
        process.percentage_of_part_affected = self.opt_f64(element, ECO, "Percentage")?;
        process.quantity_affected = self.opt_unitted(element, "Quantity")?;
        (process.identity, process.name, process.external_identity) =
            self.read_common_identifiers(element);
        process.internal_id = self.attr(element, "id");
        Ok(process)
    }

    fn read_specification(&self, element: &Element) -> Result<Specification> {
        let mut specification = Specification::new(self.req_record_reference(
            element,
            "MISpecificationReference",
            "Specification",
        )?);
        specification.quantity = self.opt_unitted(element, "Quantity")?;
        (
            specification.identity,
            specification.name,
            specification.external_identity,
        ) = self.read_common_identifiers(element);
        specification.internal_id = self.attr(element, "id");
        Ok(specification)
    }

    fn read_end_of_life_fate(&self, element: &Element) -> Result<EndOfLifeFate> {
        Ok(EndOfLifeFate::new(
            self.req_record_reference(element, "MIEndOfLifeReference", "EndOfLifeFate")?,
            self.req_f64(element, ECO, "Fraction", "EndOfLifeFate")?,
        ))
    }

    fn read_transport_stage(&self, element: &Element) -> Result<TransportStage> {
        let mut stage = TransportStage::new(
            self.req_text(element, ECO, "Name", "TransportStage")?,
            self.req_record_reference(element, "MITransportReference", "TransportStage")?,
            self.req_unitted(element, "Distance", "TransportStage")?,
        );
        stage.internal_id = self.attr(element, "id");
        Ok(stage)
    }

    fn read_use_phase(&self, element: &Element) -> Result<UsePhase> {
        let product_life_span = element
            .child(ECO, "ProductLifeSpan")
            .ok_or_else(|| self.missing("UsePhase", "ProductLifeSpan"))?;
        let mut use_phase = UsePhase::new(self.read_product_life_span(product_life_span)?);
        use_phase.electricity_mix = element
            .child(ECO, "ElectricityMix")
            .map(|child| self.read_electricity_mix(child))
            .transpose()?;
        use_phase.static_mode = element
            .child(ECO, "StaticMode")
            .map(|child| self.read_static_mode(child))
            .transpose()?;
        use_phase.mobile_mode = element
            .child(ECO, "MobileMode")
            .map(|child| self.read_mobile_mode(child))
            .transpose()?;
        Ok(use_phase)
    }

    fn read_product_life_span(&self, element: &Element) -> Result<ProductLifeSpan> {
        let mut life_span =
            ProductLifeSpan::new(self.req_f64(element, ECO, "DurationYears", "ProductLifeSpan")?);
        life_span.number_of_functional_units =
            self.opt_f64(element, ECO, "NumberOfFunctionalUnits")?;
        life_span.functional_unit_description =
            self.opt_text(element, ECO, "FunctionalUnitDescription");
        life_span.utility = element
            .child(ECO, "Utility")
            .map(|child| self.read_utility_specification(child))
            .transpose()?;
        Ok(life_span)
    }

    fn read_utility_specification(&self, element: &Element) -> Result<UtilitySpecification> {
        Ok(UtilitySpecification {
            industry_average_duration_years: self
                .opt_f64(element, ECO, "IndustryAverageDurationYears")?,
            industry_average_number_of_functional_units: self.opt_f64(
                element,
                ECO,
                "IndustryAverageNumberOfFunctionalUnits",
            )?,
            utility: self.opt_f64(element, ECO, "Utility")?,
        })
    }

    fn read_electricity_mix(&self, element: &Element) -> Result<ElectricityMix> {
        Ok(ElectricityMix {
            mi_region_reference: self.opt_record_reference(element, "MIRegionReference")?,
            percentage_fossil_fuels: self.opt_f64(element, ECO, "PercentageFossilFuels")?,
        })
    }

    fn read_static_mode(&self, element: &Element) -> Result<StaticMode> {
        Ok(StaticMode::new(
            self.req_record_reference(element, "MIEnergyConversionReference", "StaticMode")?,
            self.req_unitted(element, "PowerRating", "StaticMode")?,
            self.req_f64(element, ECO, "DaysUsedPerYear", "StaticMode")?,
            self.req_f64(element, ECO, "HoursUsedPerDay", "StaticMode")?,
        ))
    }

    fn read_mobile_mode(&self, element: &Element) -> Result<MobileMode> {
        Ok(MobileMode::new(
            self.req_record_reference(element, "MITransportReference", "MobileMode")?,
            self.req_f64(element, ECO, "DaysUsedPerYear", "MobileMode")?,
            self.req_unitted(element, "DistanceTravelledPerDay", "MobileMode")?,
        ))
    }

    fn read_location(&self, element: &Element) -> Result<Location> {
        let mut location = Location::default();
        location.mi_location_reference =
            self.opt_record_reference(element, "MILocationReference")?;
        (location.identity, location.name, location.external_identity) =
            self.read_common_identifiers(element);
        location.internal_id = self.attr(element, "id");
        Ok(location)
    }

    fn read_bom_details(&self, element: &Element) -> Result<BoMDetails> {
        Ok(BoMDetails {
            notes: self.opt_text(element, ECO, "Notes"),
            picture_url: self.opt_text(element, ECO, "PictureUrl"),
            product_name: self.opt_text(element, ECO, "ProductName"),
        })
    }

    fn read_annotation(&self, element: &Element) -> Result<Annotation> {
        let value = if let Some(text) = element.child(ECO, "Text") {
            AnnotationValue::Text(text.text_content().to_string())
        } else if let Some(quantity) = element.child(ECO, "Value") {
            AnnotationValue::Quantity(self.read_unitted_value(quantity)?)
        } else {
            return Err(self.invalid(
                "Annotation",
                "an annotation requires either a 'Text' or a 'Value' element".to_string(),
            ));
        };
        let mut annotation = Annotation::new(
            self.req_text(element, ECO, "targetId", "Annotation")?,
            self.req_text(element, ECO, "type", "Annotation")?,
            value,
        );
        annotation.source_id = self.opt_text(element, ECO, "sourceId");
        Ok(annotation)
    }

    fn read_annotation_source(&self, element: &Element) -> Result<AnnotationSource> {
        let mut source =
            AnnotationSource::new(self.req_text(element, ECO, "Name", "AnnotationSource")?);
        source.method = self.opt_text(element, ECO, "Method");
        source.data = element
            .children_named(ECO, "Data")
            .map(|child| child.text_content().to_string())
            .collect();
        source.internal_id = self.attr(element, "id");
        Ok(source)
    }

    fn read_unitted_value(&self, element: &Element) -> Result<UnittedValue> {
        let raw = element
            .text
            .as_deref()
            .ok_or_else(|| self.missing("UnittedValue", "value"))?;
        let mut value = UnittedValue::new(self.parse_f64(raw, "UnittedValue")?);
        value.unit = self.attr(element, "Unit");
        Ok(value)
    }

    fn read_record_reference(&self, element: &Element) -> Result<MiRecordReference> {
        let mut reference =
            MiRecordReference::new(self.req_text(element, GBT, "dbKey", "MIRecordReference")?);
        if let Some(identity) = element.child(GBT, "identity") {
            reference.record_history_identity =
                self.opt_u64(identity, GBT, "recordHistoryIdentity")?;
            reference.record_version_number = self.opt_u64(identity, GBT, "version")?;
        }
        reference.record_guid = self.opt_text(element, GBT, "recordGUID");
        reference.record_history_guid = self.opt_text(element, GBT, "recordHistoryGUID");
        if let Some(lookup) = element.child(GBT, "lookupValue") {
            reference.lookup_attribute_reference = lookup
                .child(GBT, "attributeReference")
                .map(|child| self.read_attribute_reference(child))
                .transpose()?;
            reference.lookup_value = self.opt_text(lookup, GBT, "attributeValue");
        }
        reference.record_uid = self.attr(element, "recordUID");
        Ok(reference)
    }

    fn read_attribute_reference(&self, element: &Element) -> Result<MiAttributeReference> {
        let mut reference =
            MiAttributeReference::new(self.req_text(element, GBT, "dbKey", "MIAttributeReference")?);
        reference.attribute_identity = self.opt_u64(element, GBT, "attributeIdentity")?;
        if let Some(name) = element.child(GBT, "name") {
            reference.table_reference = name
                .child(GBT, "table")
                .map(|child| self.read_partial_table_reference(child))
                .transpose()?;
            reference.attribute_name = self.opt_text(name, GBT, "attributeName");
            if let Some(pseudo) = self.opt_text(name, GBT, "pseudo") {
                reference.pseudo = Some(PseudoAttribute::from_xml(&pseudo).ok_or_else(|| {
                    self.invalid(
                        "MIAttributeReference",
                        format!("invalid pseudo-attribute '{pseudo}'"),
                    )
                })?);
            }
            if let Some(raw) = name.attribute("isStandard") {
                reference.is_standard = Some(self.parse_bool(raw, "MIAttributeReference")?);
            }
        }
        Ok(reference)
    }

    fn read_partial_table_reference(&self, element: &Element) -> Result<PartialTableReference> {
        Ok(PartialTableReference {
            table_identity: self.opt_u64(element, GBT, "tableIdentity")?,
            table_guid: self.opt_text(element, GBT, "tableGuid"),
            table_name: self.opt_text(element, GBT, "tableName"),
        })
    }

    fn read_common_identifiers(
        &self,
        element: &Element,
    ) -> (Option<String>, Option<String>, Option<String>) {
        (
            self.opt_text(element, ECO, "Identity"),
            self.opt_text(element, ECO, "Name"),
            self.opt_text(element, ECO, "ExternalIdentity"),
        )
    }

    fn read_list<T>(
        &self,
        element: &Element,
        container: &str,
        item: &str,
        read_item: fn(&Self, &Element) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        if let Some(container_element) = element.child(ECO, container) {
            for item_element in container_element.children_named(ECO, item) {
                items.push(read_item(self, item_element)?);
            }
        }
        Ok(items)
    }

    fn opt_unitted(&self, element: &Element, name: &str) -> Result<Option<UnittedValue>> {
        element
            .child(ECO, name)
            .map(|child| self.read_unitted_value(child))
            .transpose()
    }

    fn req_unitted(
        &self,
        element: &Element,
        name: &str,
        context: &str,
    ) -> Result<UnittedValue> {
        self.opt_unitted(element, name)?
            .ok_or_else(|| self.missing(context, name))
    }

    fn opt_record_reference(
        &self,
        element: &Element,
        name: &str,
    ) -> Result<Option<MiRecordReference>> {
        element
            .child(ECO, name)
            .map(|child| self.read_record_reference(child))
            .transpose()
    }

    fn req_record_reference(
        &self,
        element: &Element,
        name: &str,
        context: &str,
    ) -> Result<MiRecordReference> {
        self.opt_record_reference(element, name)?
            .ok_or_else(|| self.missing(context, name))
    }

    fn opt_text(&self, element: &Element, namespace: &str, name: &str) -> Option<String> {
        element
            .child(namespace, name)
            .map(|child| child.text_content().to_string())
    }

    fn req_text(
        &self,
        element: &Element,
        namespace: &str,
        name: &str,
        context: &str,
    ) -> Result<String> {
        self.opt_text(element, namespace, name)
            .ok_or_else(|| self.missing(context, name))
    }

    fn opt_f64(&self, element: &Element, namespace: &str, name: &str) -> Result<Option<f64>> {
        self.opt_text(element, namespace, name)
            .map(|raw| self.parse_f64(&raw, name))
            .transpose()
    }

    fn req_f64(
        &self,
        element: &Element,
        namespace: &str,
        name: &str,
        context: &str,
    ) -> Result<f64> {
        self.opt_f64(element, namespace, name)?
            .ok_or_else(|| self.missing(context, name))
    }

    fn opt_u64(&self, element: &Element, namespace: &str, name: &str) -> Result<Option<u64>> {
        self.opt_text(element, namespace, name)
            .map(|raw| {
                raw.parse::<u64>().map_err(|_| {
                    self.invalid(name, format!("invalid integer value '{raw}'"))
                })
            })
            .transpose()
    }

    fn opt_bool(&self, element: &Element, namespace: &str, name: &str) -> Result<Option<bool>> {
        self.opt_text(element, namespace, name)
            .map(|raw| self.parse_bool(&raw, name))
            .transpose()
    }

    fn parse_f64(&self, raw: &str, context: &str) -> Result<f64> {
        raw.parse::<f64>()
            .map_err(|_| self.invalid(context, format!("invalid floating-point value '{raw}'")))
    }

    fn parse_bool(&self, raw: &str, context: &str) -> Result<bool> {
        match raw {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(self.invalid(context, format!("invalid boolean value '{raw}'"))),
        }
    }

    fn attr(&self, element: &Element, name: &str) -> Option<String> {
        element.attribute(name).map(str::to_string)
    }

    fn missing(&self, context: &str, name: &str) -> BomError {
        self.invalid(context, format!("missing required field '{name}'"))
    }

    fn invalid(&self, context: &str, message: String) -> BomError {
        BomError::InvalidDocument(vec![Violation {
            path: context.to_string(),
            message,
        }])
    }
}
