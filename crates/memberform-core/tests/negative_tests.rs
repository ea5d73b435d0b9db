//! Negative tests - rejected operations and what they leave behind
//!
//! Every rejection must leave the form exactly as it was.

use memberform_core::api::*;
use memberform_core::error::{FormError, RosterError};
use memberform_core::registry::FormRegistry;
use memberform_core::types::FormId;

#[test]
fn test_rejects_add_over_cap() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    for _ in 2..=10 {
        registry.add_field(form_id).unwrap();
    }

    let err = registry.add_field(form_id).unwrap_err();
    assert_eq!(
        err,
        FormError::Roster(RosterError::CapExceeded { cap: 10 })
    );
    assert!(err.is_user_facing());
    assert!(err.is_recoverable());
    assert_eq!(format!("{err}"), "member number cap reached: at most 10 fields");
}

#[test]
fn test_rejects_remove_at_index_zero() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    let result = registry.remove_field(form_id, 0);
    assert!(result.is_err(), "Index 0 is never live");
}

#[test]
fn test_rejects_remove_beyond_live_range() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    registry.add_field(form_id).unwrap();

    // Live indices are 1 and 2
    let err = registry.remove_field(form_id, 3).unwrap_err();
    assert_eq!(err, FormError::Roster(RosterError::FieldNotFound { index: 3 }));
}

#[test]
fn test_rejects_remove_of_freed_index() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    registry.add_field(form_id).unwrap();
    registry.add_field(form_id).unwrap();

    registry.remove_field(form_id, 3).unwrap();

    // Index 3 is free again; removing it twice must fail
    let result = registry.remove_field(form_id, 3);
    assert!(result.is_err(), "A freed index is not removable");
}

#[test]
fn test_rejects_set_value_on_dead_index() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();

    assert!(registry.set_field_value(form_id, 0, "123").is_err());
    assert!(registry.set_field_value(form_id, 2, "123").is_err());
}

#[test]
fn test_rejects_nonexistent_form_operations() {
    let registry = FormRegistry::new();
    let fake_id = FormId::new();

    assert!(registry.add_field(fake_id).is_err(), "Add to unknown form should fail");
    assert!(registry.remove_field(fake_id, 1).is_err());
    assert!(registry.set_field_value(fake_id, 1, "123").is_err());
    assert!(registry.check_submit(fake_id).is_err());
    assert!(registry.snapshot(fake_id).is_err());
    assert!(registry.form_stats(fake_id).is_err());
    assert!(registry.discard_form(fake_id).is_err());
}

#[test]
fn test_gate_short_circuits_on_blank_first_field() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    registry.add_field(form_id).unwrap();
    registry.add_field(form_id).unwrap();

    // Fields 1 and 3 blank; the gate stops at field 1 without looking
    // further
    registry.set_field_value(form_id, 2, "222").unwrap();
    let err = registry.check_submit(form_id).unwrap_err();
    assert_eq!(
        err,
        FormError::Roster(RosterError::EmptyRequiredField { indices: vec![1] })
    );
}

#[test]
fn test_gate_collects_every_later_blank() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    for _ in 0..3 {
        registry.add_field(form_id).unwrap();
    }

    registry.set_field_value(form_id, 1, "111").unwrap();
    registry.set_field_value(form_id, 3, "333").unwrap();

    let err = registry.check_submit(form_id).unwrap_err();
    assert_eq!(
        err,
        FormError::Roster(RosterError::EmptyRequiredField { indices: vec![2, 4] })
    );
}

#[test]
fn test_rejected_operations_leave_state_untouched() {
    let registry = FormRegistry::new();
    let form_id = registry.create_form().unwrap();
    for _ in 2..=10 {
        registry.add_field(form_id).unwrap();
    }
    registry.set_field_value(form_id, 5, "555").unwrap();

    let before = registry.snapshot(form_id).unwrap();

    let _ = registry.add_field(form_id);
    let _ = registry.remove_field(form_id, 11);
    let _ = registry.set_field_value(form_id, 0, "zero");
    let _ = registry.check_submit(form_id);

    let after = registry.snapshot(form_id).unwrap();
    assert_eq!(before.fields, after.fields);
}
