use memberform_core::api::*;
use memberform_core::journal::EventFilter;
use memberform_core::registry::FormRegistry;
use memberform_core::types::PhaseKind;

#[test]
fn test_form_registry_create_form() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    let stats = registry.form_stats(form_id).unwrap();
    assert_eq!(stats.live_fields, 1);
    assert_eq!(stats.count, 2);
    assert_eq!(stats.cap, 10);
    assert_eq!(stats.phase, PhaseKind::Idle);
    assert!(stats.created_at > 0);
}

#[test]
fn test_form_registry_add_assigns_next_free_index() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    for expected in 2..=4 {
        let receipt = registry.add_field(form_id).unwrap();
        assert_eq!(receipt.index, expected);
        assert_eq!(receipt.field_name, format!("member_number_{expected}"));
        assert_eq!(receipt.remove_name, format!("remove_number_{expected}"));
    }

    let stats = registry.form_stats(form_id).unwrap();
    assert_eq!(stats.live_fields, 4);
    assert_eq!(stats.count, 5);
}

#[test]
fn test_form_registry_add_receipt_row() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    let receipt = registry.add_field(form_id).unwrap();
    assert_eq!(
        receipt.row,
        "<div class=\"input-group input-group-lg mx-auto width-50-percentage\">\
         <input name=\"member_number_2\" type=\"number\" class=\"form-control mt-3 input_added\" \
         placeholder=\"Insert your member number here\" required/>\
         <input name=\"remove_number_2\" type=\"button\" value=\"X\" \
         data-remove-index=\"2\"/></div>"
    );
}

#[test]
fn test_form_registry_remove_middle_renumbers() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    for _ in 0..3 {
        registry.add_field(form_id).unwrap();
    }
    for (index, value) in [(1, "111"), (2, "222"), (3, "333"), (4, "444")] {
        registry.set_field_value(form_id, index, value).unwrap();
    }

    let receipt = registry.remove_field(form_id, 2).unwrap();
    assert_eq!(receipt.removed_index, 2);
    assert_eq!(receipt.renames.len(), 2);

    assert_eq!(receipt.renames[0].from_index, 3);
    assert_eq!(receipt.renames[0].to_index, 2);
    assert_eq!(receipt.renames[0].field_name, "member_number_2");
    assert_eq!(receipt.renames[0].remove_name, "remove_number_2");
    assert_eq!(receipt.renames[1].from_index, 4);
    assert_eq!(receipt.renames[1].to_index, 3);

    // Values follow their fields through the shift
    let snapshot = registry.snapshot(form_id).unwrap();
    let values: Vec<&str> = snapshot.fields.iter().map(|f| f.value.as_str()).collect();
    assert_eq!(values, ["111", "333", "444"]);

    let stats = registry.form_stats(form_id).unwrap();
    assert_eq!(stats.live_fields, 3);
    assert_eq!(stats.count, 4);
}

#[test]
fn test_form_registry_remove_highest_has_no_renames() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    registry.add_field(form_id).unwrap();
    registry.add_field(form_id).unwrap();

    let receipt = registry.remove_field(form_id, 3).unwrap();
    assert_eq!(receipt.removed_index, 3);
    assert!(receipt.renames.is_empty());
}

#[test]
fn test_form_registry_remove_seeded_field_then_refill() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    registry.remove_field(form_id, 1).unwrap();
    let stats = registry.form_stats(form_id).unwrap();
    assert_eq!(stats.live_fields, 0);
    assert_eq!(stats.count, 1);

    // The list refills from index 1, and the new field is removable
    let receipt = registry.add_field(form_id).unwrap();
    assert_eq!(receipt.index, 1);
    let snapshot = registry.snapshot(form_id).unwrap();
    assert!(snapshot.fields[0].removable);
}

#[test]
fn test_form_registry_removable_flag_travels_on_shift() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    registry.add_field(form_id).unwrap();
    registry.set_field_value(form_id, 2, "555").unwrap();

    registry.remove_field(form_id, 1).unwrap();

    let snapshot = registry.snapshot(form_id).unwrap();
    assert_eq!(snapshot.fields.len(), 1);
    assert_eq!(snapshot.fields[0].index, 1);
    assert_eq!(snapshot.fields[0].name, "member_number_1");
    assert_eq!(snapshot.fields[0].value, "555");
    assert!(snapshot.fields[0].removable);

    // A manager-created field at index 1 renders a row
    let markup = registry.container_markup(form_id).unwrap();
    assert!(markup.contains("member_number_1"));
    assert!(markup.contains("data-remove-index=\"1\""));
}

#[test]
fn test_form_registry_cap_enforcement() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    for expected in 2..=10 {
        let receipt = registry.add_field(form_id).unwrap();
        assert_eq!(receipt.index, expected);
    }

    let result = registry.add_field(form_id);
    assert!(result.is_err(), "11th field should be rejected");

    // The rejected add leaves the list untouched
    let stats = registry.form_stats(form_id).unwrap();
    assert_eq!(stats.live_fields, 10);
    assert_eq!(stats.count, 11);

    assert_eq!(
        memberform_core::render::cap_notice(stats.cap),
        "You can only add up to 10 member's numbers"
    );
}

#[test]
fn test_form_registry_add_after_remove_reuses_index() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    registry.add_field(form_id).unwrap();
    registry.add_field(form_id).unwrap();

    registry.remove_field(form_id, 3).unwrap();
    let receipt = registry.add_field(form_id).unwrap();
    assert_eq!(receipt.index, 3);
}

#[test]
fn test_form_registry_container_projects_only_removable_rows() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    registry.add_field(form_id).unwrap();
    registry.add_field(form_id).unwrap();

    let markup = registry.container_markup(form_id).unwrap();
    assert!(!markup.contains("member_number_1"));
    assert!(markup.contains("member_number_2"));
    assert!(markup.contains("member_number_3"));

    let pos_2 = markup.find("member_number_2").unwrap();
    let pos_3 = markup.find("member_number_3").unwrap();
    assert!(pos_2 < pos_3, "Rows render in index order");
}

#[test]
fn test_form_registry_discard_form() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    registry.discard_form(form_id).unwrap();

    assert!(registry.add_field(form_id).is_err());
    assert!(registry.form_stats(form_id).is_err());
    assert!(registry.discard_form(form_id).is_err());
}

#[test]
fn test_form_registry_submit_gate() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    // Seeded field blank
    assert!(registry.check_submit(form_id).is_err());

    registry.set_field_value(form_id, 1, "240012345678").unwrap();
    assert!(registry.check_submit(form_id).is_ok());

    // A later blank field blocks the gate again
    registry.add_field(form_id).unwrap();
    assert!(registry.check_submit(form_id).is_err());

    registry.set_field_value(form_id, 2, "240087654321").unwrap();
    assert!(registry.check_submit(form_id).is_ok());
}

#[test]
fn test_form_registry_journal_records_actions() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    registry.add_field(form_id).unwrap();
    registry.remove_field(form_id, 2).unwrap();

    let events = registry.query_events(EventFilter::default(), 10).unwrap();
    let actions: Vec<&str> = events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, ["create_form", "add_field", "remove_field"]);

    let filter = EventFilter {
        action: Some("add_field".to_string()),
        ..Default::default()
    };
    let adds = registry.query_events(filter, 10).unwrap();
    assert_eq!(adds.len(), 1);
    assert_eq!(adds[0].form_id, form_id);
}

#[test]
fn test_form_registry_journal_isolates_forms() {
    let registry = FormRegistry::new();
    let form_a = registry.create_form().unwrap();
    let form_b = registry.create_form().unwrap();
    registry.add_field(form_a).unwrap();

    let filter = EventFilter {
        form_id: Some(form_b),
        ..Default::default()
    };
    let events = registry.query_events(filter, 10).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, "create_form");
}

#[test]
fn test_form_registry_api_version() {
    let registry = FormRegistry::new();
    let version = registry.api_version();
    assert_eq!(version.major, 1);
    assert_eq!(version.minor, 0);
    assert_eq!(version.patch, 0);
}
