mod test_helpers;

use bomeco::{
    AnnotationValue, BillOfMaterials, BomHandler, DimensionType, NonMiPartReference,
};

fn load(fixture: &str) -> BillOfMaterials {
    BomHandler::new()
        .unwrap()
        .load_bom_from_text(&test_helpers::load_fixture(fixture))
        .unwrap()
}

#[test]
fn drill_bom_root_fields() {
    let bom = load("bom-drill.xml");
    assert_eq!(bom.internal_id.as_deref(), Some("B0"));
    let notes = bom.notes.as_ref().unwrap();
    assert_eq!(notes.notes.as_deref(), Some("Part with substance"));
    assert_eq!(notes.product_name.as_deref(), Some("Part with substance"));
    assert_eq!(notes.picture_url, None);
    assert_eq!(bom.components.len(), 1);
    assert!(bom.transport_phase.is_empty());
    assert!(bom.use_phase.is_none());
}

#[test]
fn drill_bom_top_level_part() {
    let bom = load("bom-drill.xml");
    let part = &bom.components[0];
    assert_eq!(part.internal_id.as_deref(), Some("A0"));
    assert_eq!(part.part_number, "123456789");
    assert_eq!(part.part_name.as_deref(), Some("Part One"));
    let quantity = part.quantity.as_ref().unwrap();
    assert_eq!(quantity.value, 2.0);
    assert_eq!(quantity.unit.as_deref(), Some("Each"));
    assert_eq!(part.components.len(), 2);
}

#[test]
fn drill_bom_substance_fields() {
    let bom = load("bom-drill.xml");
    let part = &bom.components[0].components[0];
    assert_eq!(part.part_number, "987654321");
    assert_eq!(part.part_name.as_deref(), Some("New Part One"));
    let mass = part.mass_per_unit_of_measure.as_ref().unwrap();
    assert_eq!(mass.value, 2.0);
    assert_eq!(mass.unit.as_deref(), Some("kg/Part"));

    let substance = &part.substances[0];
    assert_eq!(substance.percentage, Some(66.0));
    assert_eq!(substance.name.as_deref(), Some("Lead oxide"));
    let reference = &substance.mi_substance_reference;
    assert_eq!(reference.db_key, "MI_Restricted_Substances");
    assert_eq!(
        reference.record_guid.as_deref(),
        Some("41656452-1b2c-4ded-ad1b-1df8b3cf6e7e")
    );
    assert_eq!(
        reference.record_history_guid.as_deref(),
        Some("af1cb650-6db5-49d6-b4a2-0eee9a090207")
    );
    assert_eq!(reference.record_history_identity, None);
    assert_eq!(reference.record_uid, None);
}

#[test]
fn drill_bom_material_fields() {
    let bom = load("bom-drill.xml");
    let part = &bom.components[0].components[1];
    assert_eq!(part.part_number, "3333");
    assert_eq!(part.part_name.as_deref(), Some("Part Two"));

    let material = &part.materials[0];
    assert_eq!(material.percentage, Some(80.0));
    assert!(material.mass.is_none());
    let reference = &material.mi_material_reference;
    assert_eq!(reference.db_key, "MI_Restricted_Substances");
    assert_eq!(
        reference.record_guid.as_deref(),
        Some("15069d02-9475-4f05-8810-57de68a2e9cc")
    );
    assert_eq!(
        reference.record_history_guid.as_deref(),
        Some("12ef41e5-0417-409e-b94b-bc79e7787db9")
    );
}

#[test]
fn assembly_bom_part_references() {
    let bom = load("bom-assembly.xml");
    let housing = &bom.components[0].components[0];
    assert_eq!(
        housing.non_mi_part_reference,
        Some(NonMiPartReference::Text("CAD-4421".to_string()))
    );

    let battery = &bom.components[0].components[1];
    assert_eq!(battery.external_id.as_deref(), Some("ERP-5512"));
    let reference = battery.mi_part_reference.as_ref().unwrap();
    assert_eq!(reference.db_key, "MI_Parts");
    assert_eq!(reference.record_uid.as_deref(), Some("batt-ref-1"));
    assert_eq!(reference.lookup_value.as_deref(), Some("BATT-18V"));

    let attribute = reference.lookup_attribute_reference.as_ref().unwrap();
    assert_eq!(attribute.db_key, "MI_Parts");
    assert_eq!(attribute.attribute_name.as_deref(), Some("Part number"));
    assert_eq!(attribute.is_standard, Some(true));
    assert_eq!(attribute.attribute_identity, None);
    let table = attribute.table_reference.as_ref().unwrap();
    assert_eq!(table.table_name.as_deref(), Some("Parts"));
    assert_eq!(table.table_identity, None);
}

#[test]
fn assembly_bom_materials_and_recycle_content() {
    let bom = load("bom-assembly.xml");
    let housing = &bom.components[0].components[0];

    let abs = &housing.materials[0];
    assert_eq!(abs.internal_id.as_deref(), Some("M1"));
    assert_eq!(abs.name.as_deref(), Some("ABS"));
    assert_eq!(abs.percentage, Some(90.0));
    assert_eq!(abs.recycle_content_is_typical, None);
    assert_eq!(abs.recycle_content_percentage, Some(35.0));
    assert_eq!(abs.end_of_life_fates[0].fraction, 0.8);
    assert_eq!(
        abs.end_of_life_fates[0].mi_end_of_life_reference.db_key,
        "MI_EndOfLife"
    );

    let tpe = &housing.materials[1];
    assert_eq!(tpe.recycle_content_is_typical, Some(true));
    assert_eq!(tpe.recycle_content_percentage, None);
    let reference = &tpe.mi_material_reference;
    assert_eq!(reference.record_history_identity, Some(9942));
    assert_eq!(reference.record_version_number, Some(2));
    assert_eq!(reference.record_guid, None);
}

#[test]
fn assembly_bom_processes() {
    let bom = load("bom-assembly.xml");
    let housing = &bom.components[0].components[0];
    let moulding = &housing.materials[0].processes[0];
    assert_eq!(moulding.dimension_type, DimensionType::Mass);
    assert_eq!(moulding.percentage_of_part_affected, Some(100.0));
    assert!(moulding.quantity_affected.is_none());

    let battery = &bom.components[0].components[1];
    let fastening = &battery.processes[0];
    assert_eq!(fastening.dimension_type, DimensionType::Count);
    let quantity = fastening.quantity_affected.as_ref().unwrap();
    assert_eq!(quantity.value, 4.0);
    assert_eq!(quantity.unit.as_deref(), Some("Each"));
}

#[test]
fn assembly_bom_substances_and_specifications() {
    let bom = load("bom-assembly.xml");
    let battery = &bom.components[0].components[1];
    let cobalt = &battery.substances[0];
    assert_eq!(cobalt.internal_id.as_deref(), Some("S1"));
    assert_eq!(cobalt.percentage, Some(0.05));
    assert_eq!(cobalt.category.as_deref(), Some("Incorporated"));
    assert_eq!(cobalt.name.as_deref(), Some("Cobalt"));
    assert_eq!(
        cobalt.mi_substance_reference.record_history_guid.as_deref(),
        Some("c61e8f3a-d7e5-4e9b-b097-0fbe41a54df6")
    );

    let specification = &bom.components[0].specifications[0];
    assert_eq!(
        specification.name.as_deref(),
        Some("Housing paint specification")
    );
    let quantity = specification.quantity.as_ref().unwrap();
    assert_eq!(quantity.value, 0.02);
    assert_eq!(quantity.unit.as_deref(), Some("m^2"));
}

#[test]
fn assembly_bom_transport_phase() {
    let bom = load("bom-assembly.xml");
    assert_eq!(bom.transport_phase.len(), 2);
    let stage = &bom.transport_phase[0];
    assert_eq!(stage.internal_id.as_deref(), Some("T1"));
    assert_eq!(stage.name, "Port to warehouse");
    assert_eq!(stage.mi_transport_reference.db_key, "MI_Transport");
    assert_eq!(stage.distance.value, 350.0);
    assert_eq!(stage.distance.unit.as_deref(), Some("km"));
}

#[test]
fn assembly_bom_use_phase() {
    let bom = load("bom-assembly.xml");
    let use_phase = bom.use_phase.as_ref().unwrap();

    let life_span = &use_phase.product_life_span;
    assert_eq!(life_span.duration_years, 8.0);
    assert_eq!(life_span.number_of_functional_units, Some(2000.0));
    assert_eq!(life_span.functional_unit_description.as_deref(), Some("hole"));
    let utility = life_span.utility.as_ref().unwrap();
    assert_eq!(utility.industry_average_duration_years, Some(5.0));
    assert_eq!(utility.industry_average_number_of_functional_units, None);
    assert_eq!(utility.utility, Some(1.6));

    let mix = use_phase.electricity_mix.as_ref().unwrap();
    assert!(mix.mi_region_reference.is_none());
    assert_eq!(mix.percentage_fossil_fuels, Some(42.0));

    let static_mode = use_phase.static_mode.as_ref().unwrap();
    assert_eq!(static_mode.mi_energy_conversion_reference.db_key, "MI_Energy");
    assert_eq!(static_mode.power_rating.value, 300.0);
    assert_eq!(static_mode.power_rating.unit.as_deref(), Some("W"));
    assert_eq!(static_mode.days_used_per_year, 30.0);
    assert_eq!(static_mode.hours_used_per_day, 0.25);

    let mobile_mode = use_phase.mobile_mode.as_ref().unwrap();
    assert_eq!(mobile_mode.days_used_per_year, 10.0);
    assert_eq!(mobile_mode.distance_travelled_per_day.value, 5.0);
    assert_eq!(
        mobile_mode.distance_travelled_per_day.unit.as_deref(),
        Some("km")
    );
}

#[test]
fn assembly_bom_location_and_notes() {
    let bom = load("bom-assembly.xml");
    let location = bom.location.as_ref().unwrap();
    assert_eq!(location.internal_id.as_deref(), Some("L1"));
    assert_eq!(location.name.as_deref(), Some("Shenzhen plant"));
    assert_eq!(location.external_identity.as_deref(), Some("PLANT-44"));
    assert_eq!(location.identity, None);
    assert_eq!(
        location.mi_location_reference.as_ref().unwrap().db_key,
        "MI_Locations"
    );

    let notes = bom.notes.as_ref().unwrap();
    assert_eq!(
        notes.picture_url.as_deref(),
        Some("https://example.com/drill.png")
    );
    assert_eq!(notes.product_name.as_deref(), Some("Cordless Drill 18V"));
}

#[test]
fn assembly_bom_annotations() {
    let bom = load("bom-assembly.xml");
    assert_eq!(bom.annotations.len(), 2);

    let mass_estimate = &bom.annotations[0];
    assert_eq!(mass_estimate.target_id, "P2");
    assert_eq!(mass_estimate.source_id(), Some("SRC1"));
    assert_eq!(mass_estimate.annotation_type, "massEstimate");
    match &mass_estimate.value {
        AnnotationValue::Quantity(quantity) => {
            assert_eq!(quantity.value, 0.45);
            assert_eq!(quantity.unit.as_deref(), Some("kg"));
        }
        other => panic!("expected a quantity annotation, got {other:?}"),
    }

    let text_note = &bom.annotations[1];
    assert_eq!(text_note.target_id, "P3");
    assert_eq!(text_note.source_id(), None);
    assert_eq!(
        text_note.value,
        AnnotationValue::Text("Supplied pre-assembled".to_string())
    );

    let source = &bom.annotation_sources[0];
    assert_eq!(source.internal_id.as_deref(), Some("SRC1"));
    assert_eq!(source.name, "BoM Analyzer");
    assert_eq!(source.method.as_deref(), Some("Estimated"));
}

// Annotations reference their targets by internal id; the fixture keeps the
// ids unique and resolvable, which is a caller precondition rather than a
// type-system invariant.
#[test]
fn assembly_bom_annotation_targets_resolve() {
    let bom = load("bom-assembly.xml");
    let drill = &bom.components[0];
    for annotation in &bom.annotations {
        let target = &annotation.target_id;
        assert!(
            drill
                .components
                .iter()
                .any(|part| part.internal_id.as_deref() == Some(target.as_str())),
            "annotation target {target} not found"
        );
    }
}
