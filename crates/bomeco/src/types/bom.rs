//! BoM structural types for the Eco namespace.

use super::refs::MiRecordReference;

/// The dimension along which a [`Process`] is quantified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionType {
    /// The process affects the bulk of the material or part (e.g. a shaping
    /// process); the amount affected may be a percentage by weight or an
    /// absolute value.
    Mass,
    /// Allows processes that removed material (e.g. milling or turning).
    MassRemoved,
    Volume,
    /// Some joining processes have an associated area.
    Area,
    /// Edge joining processes (e.g. welding) specify the length of material
    /// affected.
    Length,
    /// Fastening processes quantified by the number of fasteners (e.g. hot
    /// rivets holding two plates together).
    Count,
    Time,
}

impl DimensionType {
    pub const ALL: &'static [DimensionType] = &[
        DimensionType::Mass,
        DimensionType::MassRemoved,
        DimensionType::Volume,
        DimensionType::Area,
        DimensionType::Length,
        DimensionType::Count,
        DimensionType::Time,
    ];

    /// Parse the wire form (exact name match). Returns `None` for unknown
    /// values.
    pub fn from_xml(value: &str) -> Option<Self> {
        Some(match value {
            "Mass" => DimensionType::Mass,
            "MassRemoved" => DimensionType::MassRemoved,
            "Volume" => DimensionType::Volume,
            "Area" => DimensionType::Area,
            "Length" => DimensionType::Length,
            "Count" => DimensionType::Count,
            "Time" => DimensionType::Time,
            _ => return None,
        })
    }

    pub fn as_xml(self) -> &'static str {
        match self {
            DimensionType::Mass => "Mass",
            DimensionType::MassRemoved => "MassRemoved",
            DimensionType::Volume => "Volume",
            DimensionType::Area => "Area",
            DimensionType::Length => "Length",
            DimensionType::Count => "Count",
            DimensionType::Time => "Time",
        }
    }
}

/// A physical quantity with an optional unit.
///
/// If provided in an input the unit must exist within the MI database. An
/// absent unit means the quantity is dimensionless.
#[derive(Debug, Clone, PartialEq)]
pub struct UnittedValue {
    pub value: f64,
    pub unit: Option<String>,
}

impl UnittedValue {
    pub fn new(value: f64) -> Self {
        Self { value, unit: None }
    }

    pub fn with_unit(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: Some(unit.into()),
        }
    }
}

/// The fate of a material or part at the end-of-life of the product, e.g.
/// what fraction of its total mass or volume can be recycled.
#[derive(Debug, Clone, PartialEq)]
pub struct EndOfLifeFate {
    /// Reference identifying the applicable fate within the MI database.
    pub mi_end_of_life_reference: MiRecordReference,
    /// Fraction of the total mass or volume of material to which this fate
    /// applies.
    pub fraction: f64,
}

impl EndOfLifeFate {
    pub fn new(mi_end_of_life_reference: MiRecordReference, fraction: f64) -> Self {
        Self {
            mi_end_of_life_reference,
            fraction,
        }
    }
}

/// The manufacturing location for the BoM, for use in process calculations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    /// Reference to a record in the MI database representing the
    /// manufacturing location.
    pub mi_location_reference: Option<MiRecordReference>,
    /// A display identity for the object.
    pub identity: Option<String>,
    /// A display name for the object.
    pub name: Option<String>,
    /// A temporary reference populated and used by applications to refer to
    /// the item within the BoM.
    pub external_identity: Option<String>,
    /// A unique identity for this object in this BoM, only used by other
    /// elements to reference this element.
    pub internal_id: Option<String>,
}

/// The electrical generation mix of the region of use, specified either as a
/// region record or as the percentage of power from fossil fuel sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElectricityMix {
    pub mi_region_reference: Option<MiRecordReference>,
    pub percentage_fossil_fuels: Option<f64>,
}

/// Details of how the product is transported as part of its use.
#[derive(Debug, Clone, PartialEq)]
pub struct MobileMode {
    /// Reference to a record representing the means of transport for this
    /// product during use.
    pub mi_transport_reference: MiRecordReference,
    /// The number of days in a year the product will be transported during
    /// use.
    pub days_used_per_year: f64,
    /// The distance the product will be transported each day as part of its
    /// use.
    pub distance_travelled_per_day: UnittedValue,
}

impl MobileMode {
    pub fn new(
        mi_transport_reference: MiRecordReference,
        days_used_per_year: f64,
        distance_travelled_per_day: UnittedValue,
    ) -> Self {
        Self {
            mi_transport_reference,
            days_used_per_year,
            distance_travelled_per_day,
        }
    }
}

/// The primary energy conversion that occurs during the product's use.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMode {
    /// Reference to a record representing the primary energy conversion
    /// taking place when the product is in use.
    pub mi_energy_conversion_reference: MiRecordReference,
    /// The power rating of the product whilst in use.
    pub power_rating: UnittedValue,
    pub days_used_per_year: f64,
    pub hours_used_per_day: f64,
}

impl StaticMode {
    pub fn new(
        mi_energy_conversion_reference: MiRecordReference,
        power_rating: UnittedValue,
        days_used_per_year: f64,
        hours_used_per_day: f64,
    ) -> Self {
        Self {
            mi_energy_conversion_reference,
            power_rating,
            days_used_per_year,
            hours_used_per_day,
        }
    }
}

/// How much use can be obtained from the product compared to a
/// representative industry average.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtilitySpecification {
    /// The average lifespan of all examples, throughout the industry, of
    /// this kind of product.
    pub industry_average_duration_years: Option<f64>,
    /// The average number of functional units delivered, in their lifespan,
    /// by all industry examples of this kind of product.
    pub industry_average_number_of_functional_units: Option<f64>,
    /// Directly specifies the utility.
    pub utility: Option<f64>,
}

/// The average life span of the product represented by the BoM.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLifeSpan {
    /// The product lifespan in years.
    pub duration_years: f64,
    /// The number of functional units delivered in the lifespan of the
    /// product.
    pub number_of_functional_units: Option<f64>,
    /// A short (ideally one-word) description of a single functional unit.
    pub functional_unit_description: Option<String>,
    pub utility: Option<UtilitySpecification>,
}

impl ProductLifeSpan {
    pub fn new(duration_years: f64) -> Self {
        Self {
            duration_years,
            number_of_functional_units: None,
            functional_unit_description: None,
            utility: None,
        }
    }
}

/// Sustainability of the product whilst in use: its expected life span and
/// the electricity and transport drivers of in-use environmental impact.
#[derive(Debug, Clone, PartialEq)]
pub struct UsePhase {
    pub product_life_span: ProductLifeSpan,
    pub electricity_mix: Option<ElectricityMix>,
    pub static_mode: Option<StaticMode>,
    pub mobile_mode: Option<MobileMode>,
}

impl UsePhase {
    pub fn new(product_life_span: ProductLifeSpan) -> Self {
        Self {
            product_life_span,
            electricity_mix: None,
            static_mode: None,
            mobile_mode: None,
        }
    }
}

/// Explanatory information about a BoM.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoMDetails {
    /// General notes for the BoM object.
    pub notes: Option<String>,
    /// URL of an image to include at the top of the report; must be
    /// accessible from the reporting services server.
    pub picture_url: Option<String>,
    pub product_name: Option<String>,
}

/// One transportation stage applied to the BoM: a generic transportation
/// type stored in the database plus the amount of it used here.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportStage {
    /// Name of this stage, used only to identify it within the BoM.
    pub name: String,
    /// Reference to a record representing the means of transportation for
    /// this stage.
    pub mi_transport_reference: MiRecordReference,
    /// The distance covered by this stage.
    pub distance: UnittedValue,
    pub internal_id: Option<String>,
}

impl TransportStage {
    pub fn new(
        name: impl Into<String>,
        mi_transport_reference: MiRecordReference,
        distance: UnittedValue,
    ) -> Self {
        Self {
            name: name.into(),
            mi_transport_reference,
            distance,
            internal_id: None,
        }
    }
}

/// A specification for a surface treatment, part, process or material,
/// stored in the MI database together with its impact.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    pub mi_specification_reference: MiRecordReference,
    /// A quantification of the specification, if applicable.
    pub quantity: Option<UnittedValue>,
    pub identity: Option<String>,
    pub name: Option<String>,
    pub external_identity: Option<String>,
    pub internal_id: Option<String>,
}

impl Specification {
    pub fn new(mi_specification_reference: MiRecordReference) -> Self {
        Self {
            mi_specification_reference,
            quantity: None,
            identity: None,
            name: None,
            external_identity: None,
            internal_id: None,
        }
    }
}

/// A substance within a part, semi-finished part, material or specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Substance {
    pub mi_substance_reference: MiRecordReference,
    /// If the parent object consists of more than one substance, the
    /// percentage of this substance.
    pub percentage: Option<f64>,
    /// Free-form category string; its semantics are agreed out of band.
    pub category: Option<String>,
    pub identity: Option<String>,
    pub name: Option<String>,
    pub external_identity: Option<String>,
    pub internal_id: Option<String>,
}

impl Substance {
    pub fn new(mi_substance_reference: MiRecordReference) -> Self {
        Self {
            mi_substance_reference,
            percentage: None,
            category: None,
            identity: None,
            name: None,
            external_identity: None,
            internal_id: None,
        }
    }
}

/// A process applied to a subassembly, part, semi-finished part or material,
/// quantified along the stated dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    /// Reference identifying the record containing information about this
    /// process.
    pub mi_process_reference: MiRecordReference,
    /// The dimension affected by the process, for example area for coatings
    /// or mass removed for machining operations.
    pub dimension_type: DimensionType,
    /// Fraction of the object affected by the process, with basis specified
    /// by `dimension_type`.
    pub percentage_of_part_affected: Option<f64>,
    /// Amount affected by the process according to its dimension type, e.g.
    /// 17 fasteners galvanized out of 24 total.
    pub quantity_affected: Option<UnittedValue>,
    pub identity: Option<String>,
    pub name: Option<String>,
    pub external_identity: Option<String>,
    pub internal_id: Option<String>,
}

impl Process {
    pub fn new(mi_process_reference: MiRecordReference, dimension_type: DimensionType) -> Self {
        Self {
            mi_process_reference,
            dimension_type,
            percentage_of_part_affected: None,
            quantity_affected: None,
            identity: None,
            name: None,
            external_identity: None,
            internal_id: None,
        }
    }
}

/// A material within a part or semi-finished part.
///
/// The quantification basis is exclusive: provide either `percentage` (of
/// the parent part) or `mass`, not both. Recycle content is likewise an
/// exclusive choice between "typical for this material" and an explicit
/// percentage. Neither exclusivity is enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub mi_material_reference: MiRecordReference,
    /// The fraction of the part consisting of this material. Provide either
    /// this or `mass`.
    pub percentage: Option<f64>,
    /// The mass of this material present within the part. Provide either
    /// this or `percentage`.
    pub mass: Option<UnittedValue>,
    /// If true, the material's recyclability is typical and the value in the
    /// MI record is used.
    pub recycle_content_is_typical: Option<bool>,
    /// If the recyclability is not typical, or no typical value is
    /// available, the percentage of this material that can be recycled.
    pub recycle_content_percentage: Option<f64>,
    /// Processes associated with the production and preparation of this
    /// material.
    pub processes: Vec<Process>,
    /// The fates of this material once the product is disposed of.
    pub end_of_life_fates: Vec<EndOfLifeFate>,
    pub identity: Option<String>,
    pub name: Option<String>,
    pub external_identity: Option<String>,
    pub internal_id: Option<String>,
}

impl Material {
    pub fn new(mi_material_reference: MiRecordReference) -> Self {
        Self {
            mi_material_reference,
            percentage: None,
            mass: None,
            recycle_content_is_typical: None,
            recycle_content_percentage: None,
            processes: Vec::new(),
            end_of_life_fates: Vec::new(),
            identity: None,
            name: None,
            external_identity: None,
            internal_id: None,
        }
    }
}

/// A reference to a part stored in another system, for informational
/// purposes only.
#[derive(Debug, Clone, PartialEq)]
pub enum NonMiPartReference {
    Text(String),
    Integer(i64),
}

/// A single part, which may or may not be stored in the MI database.
///
/// Parts nest recursively through `components`. If `mass_per_unit_of_measure`
/// is specified and `volume_per_unit_of_measure` is not, material
/// percentages within this part are interpreted as percentage by mass, and
/// vice versa - an interpretation rule for consumers, not stored state.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// The quantity of part(s) used in the parent part. For discrete parts
    /// this is the part count - an integer with a blank unit (or "Each").
    /// For continuous parts it is a mass, length, area or volume.
    pub quantity: Option<UnittedValue>,
    /// The mass of the part, after processing, relative to the unit that
    /// `quantity` is given in.
    pub mass_per_unit_of_measure: Option<UnittedValue>,
    /// The volume of the part, after processing, relative to the unit that
    /// `quantity` is given in.
    pub volume_per_unit_of_measure: Option<UnittedValue>,
    /// The part number associated with this part.
    pub part_number: String,
    /// Display name for the part.
    pub part_name: Option<String>,
    /// A temporary reference populated and used by applications to refer to
    /// the item within the BoM.
    pub external_id: Option<String>,
    /// A reference identifying a part stored in the MI database.
    pub mi_part_reference: Option<MiRecordReference>,
    /// A reference to a part stored in another system.
    pub non_mi_part_reference: Option<NonMiPartReference>,
    /// Subcomponents of this part.
    pub components: Vec<Part>,
    pub specifications: Vec<Specification>,
    /// Constituent materials making up this part.
    pub materials: Vec<Material>,
    pub substances: Vec<Substance>,
    /// Processes used in the manufacture of this part.
    pub processes: Vec<Process>,
    /// Justifications for RoHS exemptions, if the part has any. A part
    /// analyzed as non-compliant with one or more exemptions is reported as
    /// compliant with exemptions instead.
    pub rohs_exemptions: Vec<String>,
    /// The fate(s) of the part at the end-of-life of the product.
    pub end_of_life_fates: Vec<EndOfLifeFate>,
    pub internal_id: Option<String>,
}

impl Part {
    pub fn new(part_number: impl Into<String>) -> Self {
        Self {
            quantity: None,
            mass_per_unit_of_measure: None,
            volume_per_unit_of_measure: None,
            part_number: part_number.into(),
            part_name: None,
            external_id: None,
            mi_part_reference: None,
            non_mi_part_reference: None,
            components: Vec::new(),
            specifications: Vec::new(),
            materials: Vec::new(),
            substances: Vec::new(),
            processes: Vec::new(),
            rohs_exemptions: Vec::new(),
            end_of_life_fates: Vec::new(),
            internal_id: None,
        }
    }
}

/// The source of annotations in the BoM.
///
/// Each source may be referenced by zero or more annotations. The producer
/// and consumer(s) of the BoM must agree the understood source semantics,
/// particularly regarding the untyped data carried here; a tool that
/// consumes and re-produces BoMs should generally retain sources it does not
/// understand.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSource {
    /// The name of the software package that generated the annotations.
    pub name: String,
    /// The calculation method used to generate the annotations.
    pub method: Option<String>,
    /// Data that the consumer of the BoM may require, preserved verbatim.
    pub data: Vec<String>,
    pub internal_id: Option<String>,
}

impl AnnotationSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: None,
            data: Vec::new(),
            internal_id: None,
        }
    }
}

/// The content of an [`Annotation`]: free text, or a quantity such as
/// embodied energy of production.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Text(String),
    Quantity(UnittedValue),
}

/// An annotation attached to one element of the BoM.
///
/// The understood annotation types must be agreed between the producer and
/// consumer(s) of the BoM, including whether several annotations of one type
/// may target a single element. A tool that consumes and re-produces BoMs
/// should generally retain annotations it does not understand.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// The `internal_id` of exactly one element to which the annotation
    /// applies.
    pub target_id: String,
    /// If provided, the `internal_id` of exactly one [`AnnotationSource`]
    /// describing the source of the annotation.
    pub source_id: Option<String>,
    /// Indicates the type of the annotation; accepted values are agreed
    /// between the producer and consumer(s) of the BoM.
    pub annotation_type: String,
    /// The content of this annotation.
    pub value: AnnotationValue,
}

impl Annotation {
    pub fn new(
        target_id: impl Into<String>,
        annotation_type: impl Into<String>,
        value: AnnotationValue,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            source_id: None,
            annotation_type: annotation_type.into(),
            value,
        }
    }

    /// The `internal_id` of the [`AnnotationSource`] this annotation refers
    /// to, if any.
    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }
}

/// The root Bill of Materials object.
#[derive(Debug, Clone, PartialEq)]
pub struct BillOfMaterials {
    /// The top-level parts contained within this BoM.
    pub components: Vec<Part>,
    /// The different forms of transport to which the parts are subject.
    pub transport_phase: Vec<TransportStage>,
    /// The type of use to which this product is subject.
    pub use_phase: Option<UsePhase>,
    /// The location in which the object represented by the BoM is assembled.
    pub location: Option<Location>,
    /// Any optional notes about this BoM.
    pub notes: Option<BoMDetails>,
    /// Annotations associated with objects within the BoM.
    pub annotations: Vec<Annotation>,
    /// Sources for annotations present within the BoM.
    pub annotation_sources: Vec<AnnotationSource>,
    /// A unique identity for this object in this BoM. Where present,
    /// `internal_id` values must be unique within one document - a caller
    /// precondition, not enforced by this type.
    pub internal_id: Option<String>,
}

impl BillOfMaterials {
    pub fn new(components: Vec<Part>) -> Self {
        Self {
            components,
            transport_phase: Vec::new(),
            use_phase: None,
            location: None,
            notes: None,
            annotations: Vec::new(),
            annotation_sources: Vec::new(),
            internal_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_type_round_trips_through_its_wire_form() {
        for &dimension in DimensionType::ALL {
            assert_eq!(DimensionType::from_xml(dimension.as_xml()), Some(dimension));
        }
        assert_eq!(DimensionType::from_xml("mass"), None);
    }

    // The original binding's source_id accessor returned itself instead of
    // the backing field; this pins the intended behavior.
    #[test]
    fn annotation_source_id_returns_the_stored_value() {
        let mut annotation = Annotation::new(
            "part-1",
            "additionalText",
            AnnotationValue::Text("checked by hand".to_string()),
        );
        assert_eq!(annotation.source_id(), None);
        annotation.source_id = Some("source-0".to_string());
        assert_eq!(annotation.source_id(), Some("source-0"));
    }

    #[test]
    fn entities_are_mutable_after_construction() {
        let mut part = Part::new("P-100");
        part.part_name = Some("Housing".to_string());
        part.quantity = Some(UnittedValue::with_unit(2.0, "Each"));
        part.components.push(Part::new("P-101"));
        assert_eq!(part.components.len(), 1);
        assert_eq!(part.quantity.as_ref().map(|q| q.value), Some(2.0));
    }
}
