//! Declarative binding metadata.
//!
//! Every bound type declares its XML namespace and the complete set of names
//! it may carry on the wire: scalar values (child element text, `$` for the
//! element's own text content, or a leading `@` for an attribute), nested
//! complex types, wrapped lists, and the anonymous wrapper groups that do
//! not map onto a bound type of their own. The validator walks these tables;
//! the reader and writer implement the same shapes with one function per
//! type, dispatched on [`TypeName`] so a missing binding is a compile error
//! rather than a runtime lookup failure.
//!
//! Complex and list container elements are qualified by the namespace of the
//! type that declares them; a nested type's own fields are qualified by that
//! nested type's namespace. This is how a record reference element such as
//! `MISubstanceReference` lives in the Eco namespace while its `dbKey`
//! content lives in the base-types namespace.

use crate::types::{NAMESPACE_BOM_ECO, NAMESPACE_GRANTA_BASE_TYPES};

/// Every entity kind bound to the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    PartialTableReference,
    MiAttributeReference,
    MiRecordReference,
    UnittedValue,
    EndOfLifeFate,
    Location,
    ElectricityMix,
    MobileMode,
    StaticMode,
    UtilitySpecification,
    ProductLifeSpan,
    UsePhase,
    BoMDetails,
    TransportStage,
    Specification,
    Substance,
    Process,
    Material,
    Part,
    AnnotationSource,
    Annotation,
    BillOfMaterials,
}

impl TypeName {
    pub const ALL: &'static [TypeName] = &[
        TypeName::PartialTableReference,
        TypeName::MiAttributeReference,
        TypeName::MiRecordReference,
        TypeName::UnittedValue,
        TypeName::EndOfLifeFate,
        TypeName::Location,
        TypeName::ElectricityMix,
        TypeName::MobileMode,
        TypeName::StaticMode,
        TypeName::UtilitySpecification,
        TypeName::ProductLifeSpan,
        TypeName::UsePhase,
        TypeName::BoMDetails,
        TypeName::TransportStage,
        TypeName::Specification,
        TypeName::Substance,
        TypeName::Process,
        TypeName::Material,
        TypeName::Part,
        TypeName::AnnotationSource,
        TypeName::Annotation,
        TypeName::BillOfMaterials,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::PartialTableReference => "PartialTableReference",
            TypeName::MiAttributeReference => "MIAttributeReference",
            TypeName::MiRecordReference => "MIRecordReference",
            TypeName::UnittedValue => "UnittedValue",
            TypeName::EndOfLifeFate => "EndOfLifeFate",
            TypeName::Location => "Location",
            TypeName::ElectricityMix => "ElectricityMix",
            TypeName::MobileMode => "MobileMode",
            TypeName::StaticMode => "StaticMode",
            TypeName::UtilitySpecification => "UtilitySpecification",
            TypeName::ProductLifeSpan => "ProductLifeSpan",
            TypeName::UsePhase => "UsePhase",
            TypeName::BoMDetails => "BoMDetails",
            TypeName::TransportStage => "TransportStage",
            TypeName::Specification => "Specification",
            TypeName::Substance => "Substance",
            TypeName::Process => "Process",
            TypeName::Material => "Material",
            TypeName::Part => "Part",
            TypeName::AnnotationSource => "AnnotationSource",
            TypeName::Annotation => "Annotation",
            TypeName::BillOfMaterials => "BillOfMaterials",
        }
    }
}

/// Lexical kind of a scalar value, used for conformance checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Float,
    Integer,
    Boolean,
    Dimension,
    Pseudo,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldShape {
    Scalar(ValueKind),
    /// A scalar element that may repeat.
    ScalarList(ValueKind),
    Complex(TypeName),
    /// A container element wrapping a repeated item element.
    List {
        item: TypeName,
        item_namespace: &'static str,
        item_name: &'static str,
    },
    /// An anonymous wrapper element with its own inner fields.
    Group(&'static [NamedField]),
}

#[derive(Debug, Clone, Copy)]
pub struct NamedField {
    /// Local name; `@name` denotes an attribute, `$` the element's own text.
    pub name: &'static str,
    pub shape: FieldShape,
    pub required: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    pub namespace: &'static str,
    pub fields: &'static [NamedField],
}

const fn field(name: &'static str, shape: FieldShape) -> NamedField {
    NamedField {
        name,
        shape,
        required: false,
    }
}

const fn required(name: &'static str, shape: FieldShape) -> NamedField {
    NamedField {
        name,
        shape,
        required: true,
    }
}

const fn eco_list(item: TypeName, item_name: &'static str) -> FieldShape {
    FieldShape::List {
        item,
        item_namespace: NAMESPACE_BOM_ECO,
        item_name,
    }
}

use FieldShape::{Complex, Group, Scalar, ScalarList};
use ValueKind::{Boolean, Dimension, Float, Integer, Pseudo, Text};

static PARTIAL_TABLE_REFERENCE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_GRANTA_BASE_TYPES,
    fields: &[
        field("tableIdentity", Scalar(Integer)),
        field("tableGuid", Scalar(Text)),
        field("tableName", Scalar(Text)),
    ],
};

static MI_ATTRIBUTE_REFERENCE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_GRANTA_BASE_TYPES,
    fields: &[
        required("dbKey", Scalar(Text)),
        field("attributeIdentity", Scalar(Integer)),
        field(
            "name",
            Group(&[
                field("table", Complex(TypeName::PartialTableReference)),
                field("attributeName", Scalar(Text)),
                field("pseudo", Scalar(Pseudo)),
                field("@isStandard", Scalar(Boolean)),
            ]),
        ),
    ],
};

static MI_RECORD_REFERENCE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_GRANTA_BASE_TYPES,
    fields: &[
        required("dbKey", Scalar(Text)),
        field(
            "identity",
            Group(&[
                required("recordHistoryIdentity", Scalar(Integer)),
                field("version", Scalar(Integer)),
            ]),
        ),
        field("recordGUID", Scalar(Text)),
        field("recordHistoryGUID", Scalar(Text)),
        field(
            "lookupValue",
            Group(&[
                required(
                    "attributeReference",
                    Complex(TypeName::MiAttributeReference),
                ),
                required("attributeValue", Scalar(Text)),
            ]),
        ),
        field("@recordUID", Scalar(Text)),
    ],
};

static UNITTED_VALUE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[required("$", Scalar(Float)), field("@Unit", Scalar(Text))],
};

static END_OF_LIFE_FATE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required("MIEndOfLifeReference", Complex(TypeName::MiRecordReference)),
        required("Fraction", Scalar(Float)),
    ],
};

static LOCATION: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        field("MILocationReference", Complex(TypeName::MiRecordReference)),
        field("Identity", Scalar(Text)),
        field("Name", Scalar(Text)),
        field("ExternalIdentity", Scalar(Text)),
        field("@id", Scalar(Text)),
    ],
};

static ELECTRICITY_MIX: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        field("MIRegionReference", Complex(TypeName::MiRecordReference)),
        field("PercentageFossilFuels", Scalar(Float)),
    ],
};

static MOBILE_MODE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required("MITransportReference", Complex(TypeName::MiRecordReference)),
        required("DaysUsedPerYear", Scalar(Float)),
        required("DistanceTravelledPerDay", Complex(TypeName::UnittedValue)),
    ],
};

static STATIC_MODE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required(
            "MIEnergyConversionReference",
            Complex(TypeName::MiRecordReference),
        ),
        required("PowerRating", Complex(TypeName::UnittedValue)),
        required("DaysUsedPerYear", Scalar(Float)),
        required("HoursUsedPerDay", Scalar(Float)),
    ],
};

static UTILITY_SPECIFICATION: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        field("IndustryAverageDurationYears", Scalar(Float)),
        field("IndustryAverageNumberOfFunctionalUnits", Scalar(Float)),
        field("Utility", Scalar(Float)),
    ],
};

static PRODUCT_LIFE_SPAN: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required("DurationYears", Scalar(Float)),
        field("NumberOfFunctionalUnits", Scalar(Float)),
        field("FunctionalUnitDescription", Scalar(Text)),
        field("Utility", Complex(TypeName::UtilitySpecification)),
    ],
};

static USE_PHASE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required("ProductLifeSpan", Complex(TypeName::ProductLifeSpan)),
        field("ElectricityMix", Complex(TypeName::ElectricityMix)),
        field("StaticMode", Complex(TypeName::StaticMode)),
        field("MobileMode", Complex(TypeName::MobileMode)),
    ],
};

static BOM_DETAILS: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        field("Notes", Scalar(Text)),
        field("PictureUrl", Scalar(Text)),
        field("ProductName", Scalar(Text)),
    ],
};

static TRANSPORT_STAGE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required("Name", Scalar(Text)),
        required("MITransportReference", Complex(TypeName::MiRecordReference)),
        required("Distance", Complex(TypeName::UnittedValue)),
        field("@id", Scalar(Text)),
    ],
};

static SPECIFICATION: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required(
            "MISpecificationReference",
            Complex(TypeName::MiRecordReference),
        ),
        field("Quantity", Complex(TypeName::UnittedValue)),
        field("Identity", Scalar(Text)),
        field("Name", Scalar(Text)),
        field("ExternalIdentity", Scalar(Text)),
        field("@id", Scalar(Text)),
    ],
};

static SUBSTANCE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        field("Percentage", Scalar(Float)),
        field("Category", Scalar(Text)),
        required("MISubstanceReference", Complex(TypeName::MiRecordReference)),
        field("Identity", Scalar(Text)),
        field("Name", Scalar(Text)),
        field("ExternalIdentity", Scalar(Text)),
        field("@id", Scalar(Text)),
    ],
};

static PROCESS: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required("MIProcessReference", Complex(TypeName::MiRecordReference)),
        required("DimensionType", Scalar(Dimension)),
        field("Percentage", Scalar(Float)),
        field("Quantity", Complex(TypeName::UnittedValue)),
        field("Identity", Scalar(Text)),
        field("Name", Scalar(Text)),
        field("ExternalIdentity", Scalar(Text)),
        field("@id", Scalar(Text)),
    ],
};

static MATERIAL: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        field("Percentage", Scalar(Float)),
        field("Mass", Complex(TypeName::UnittedValue)),
        required("MIMaterialReference", Complex(TypeName::MiRecordReference)),
        field(
            "RecycleContent",
            Group(&[
                field("Typical", Scalar(Boolean)),
                field("Percentage", Scalar(Float)),
            ]),
        ),
        field("Processes", eco_list(TypeName::Process, "Process")),
        field(
            "EndOfLifeFates",
            eco_list(TypeName::EndOfLifeFate, "EndOfLifeFate"),
        ),
        field("Identity", Scalar(Text)),
        field("Name", Scalar(Text)),
        field("ExternalIdentity", Scalar(Text)),
        field("@id", Scalar(Text)),
    ],
};

static PART: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        field("Quantity", Complex(TypeName::UnittedValue)),
        field("MassPerUom", Complex(TypeName::UnittedValue)),
        field("VolumePerUom", Complex(TypeName::UnittedValue)),
        required("PartNumber", Scalar(Text)),
        field("Name", Scalar(Text)),
        field("ExternalIdentity", Scalar(Text)),
        field("MIPartReference", Complex(TypeName::MiRecordReference)),
        field("NonMIPartReference", Scalar(Text)),
        field("Components", eco_list(TypeName::Part, "Part")),
        field(
            "Specifications",
            eco_list(TypeName::Specification, "Specification"),
        ),
        field("Materials", eco_list(TypeName::Material, "Material")),
        field("Substances", eco_list(TypeName::Substance, "Substance")),
        field("Processes", eco_list(TypeName::Process, "Process")),
        field(
            "RohsExemptions",
            Group(&[field("RohsExemption", ScalarList(Text))]),
        ),
        field(
            "EndOfLifeFates",
            eco_list(TypeName::EndOfLifeFate, "EndOfLifeFate"),
        ),
        field("@id", Scalar(Text)),
    ],
};

static ANNOTATION_SOURCE: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required("Name", Scalar(Text)),
        field("Method", Scalar(Text)),
        field("Data", ScalarList(Text)),
        field("@id", Scalar(Text)),
    ],
};

static ANNOTATION: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required("targetId", Scalar(Text)),
        field("sourceId", Scalar(Text)),
        required("type", Scalar(Text)),
        field("Text", Scalar(Text)),
        field("Value", Complex(TypeName::UnittedValue)),
    ],
};

static BILL_OF_MATERIALS: TypeDescriptor = TypeDescriptor {
    namespace: NAMESPACE_BOM_ECO,
    fields: &[
        required("Components", eco_list(TypeName::Part, "Part")),
        field(
            "TransportPhase",
            eco_list(TypeName::TransportStage, "TransportStage"),
        ),
        field("UsePhase", Complex(TypeName::UsePhase)),
        field("Location", Complex(TypeName::Location)),
        field("Notes", Complex(TypeName::BoMDetails)),
        field("Annotations", eco_list(TypeName::Annotation, "Annotation")),
        field(
            "AnnotationSources",
            eco_list(TypeName::AnnotationSource, "AnnotationSource"),
        ),
        field("@id", Scalar(Text)),
    ],
};

pub fn descriptor(name: TypeName) -> &'static TypeDescriptor {
    match name {
        TypeName::PartialTableReference => &PARTIAL_TABLE_REFERENCE,
        TypeName::MiAttributeReference => &MI_ATTRIBUTE_REFERENCE,
        TypeName::MiRecordReference => &MI_RECORD_REFERENCE,
        TypeName::UnittedValue => &UNITTED_VALUE,
        TypeName::EndOfLifeFate => &END_OF_LIFE_FATE,
        TypeName::Location => &LOCATION,
        TypeName::ElectricityMix => &ELECTRICITY_MIX,
        TypeName::MobileMode => &MOBILE_MODE,
        TypeName::StaticMode => &STATIC_MODE,
        TypeName::UtilitySpecification => &UTILITY_SPECIFICATION,
        TypeName::ProductLifeSpan => &PRODUCT_LIFE_SPAN,
        TypeName::UsePhase => &USE_PHASE,
        TypeName::BoMDetails => &BOM_DETAILS,
        TypeName::TransportStage => &TRANSPORT_STAGE,
        TypeName::Specification => &SPECIFICATION,
        TypeName::Substance => &SUBSTANCE,
        TypeName::Process => &PROCESS,
        TypeName::Material => &MATERIAL,
        TypeName::Part => &PART,
        TypeName::AnnotationSource => &ANNOTATION_SOURCE,
        TypeName::Annotation => &ANNOTATION,
        TypeName::BillOfMaterials => &BILL_OF_MATERIALS,
    }
}
