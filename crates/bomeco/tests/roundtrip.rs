mod test_helpers;

use bomeco::BomHandler;
use similar::TextDiff;

const FIXTURES: &[&str] = &["bom-drill.xml", "bom-assembly.xml"];

#[test]
fn fixture_boms_round_trip_structurally_from_text() {
    let handler = BomHandler::new().unwrap();
    for fixture in FIXTURES {
        let text = test_helpers::load_fixture(fixture);
        let bom = handler.load_bom_from_text(&text).unwrap();

        let rendered = handler.dump_bom(&bom).unwrap();
        let reloaded = handler.load_bom_from_text(&rendered).unwrap();

        assert_eq!(bom, reloaded, "{fixture} did not round-trip");
    }
}

#[test]
fn fixture_boms_round_trip_structurally_from_file() {
    let handler = BomHandler::new().unwrap();
    for fixture in FIXTURES {
        let bom = handler
            .load_bom_from_file(&test_helpers::fixture_path(fixture))
            .unwrap();

        let rendered = handler.dump_bom(&bom).unwrap();
        let reloaded = handler.load_bom_from_text(&rendered).unwrap();

        assert_eq!(bom, reloaded, "{fixture} did not round-trip");
    }
}

// Stronger, format-sensitive property: canonically formatted input is
// reproduced byte for byte.
#[test]
fn canonical_documents_are_reproduced_exactly() {
    let handler = BomHandler::new().unwrap();
    for fixture in FIXTURES {
        let source = test_helpers::load_fixture(fixture);
        let bom = handler.load_bom_from_text(&source).unwrap();
        let rendered = handler.dump_bom(&bom).unwrap();

        let expected = source.trim_end();
        let actual = rendered.trim_end();
        if expected != actual {
            let diff = TextDiff::from_lines(expected, actual);
            panic!(
                "{fixture} changed on round-trip:\n{}",
                diff.unified_diff().header("fixture", "rendered")
            );
        }
    }
}

#[test]
fn decode_is_deterministic() {
    let handler = BomHandler::new().unwrap();
    let text = test_helpers::load_fixture("bom-assembly.xml");
    let first = handler.load_bom_from_text(&text).unwrap();
    let second = handler.load_bom_from_text(&text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn list_order_is_preserved() {
    let handler = BomHandler::new().unwrap();
    let bom = handler
        .load_bom_from_text(&test_helpers::load_fixture("bom-assembly.xml"))
        .unwrap();
    let names: Vec<_> = bom
        .transport_phase
        .iter()
        .map(|stage| stage.name.as_str())
        .collect();
    assert_eq!(names, ["Port to warehouse", "Warehouse to customer"]);

    let exemptions = &bom.components[0].components[0].rohs_exemptions;
    assert_eq!(exemptions, &["6(c)", "7(a)"]);

    let data = &bom.annotation_sources[0].data;
    assert_eq!(data, &["run=2024-11-02", "operator=QA"]);
}
