use super::*;
use shared::domain::{default_pass_catalog, PassIcon};

use crate::routing::EmptyCatalogPolicy;

fn completed_form() -> RegistrationForm {
    RegistrationForm {
        name: "Alice".to_string(),
        email: "a@b.com".to_string(),
        mobile: "5551234567".to_string(),
        code: "XYZ".to_string(),
        otp: "0000".to_string(),
        is_otp_sent: true,
    }
}

fn ready_state() -> RegistrationState {
    RegistrationState {
        form: completed_form(),
        ..RegistrationState::default()
    }
}

fn selecting_state() -> RegistrationState {
    let rules = ReducerRules::default();
    reduce(
        &ready_state(),
        FlowEvent::PassesResolved {
            passes: default_pass_catalog(),
        },
        &rules,
    )
    .expect("resolve passes")
    .state
}

#[test]
fn field_update_touches_only_that_field() {
    let state = ready_state();
    let transition = reduce(
        &state,
        FlowEvent::FieldUpdated {
            field: FormField::Name,
            value: "Bob".to_string(),
        },
        &ReducerRules::default(),
    )
    .expect("update");

    let mut expected = state.clone();
    expected.form.name = "Bob".to_string();
    assert_eq!(transition.state, expected);
    assert!(transition.notices.is_empty());
}

#[test]
fn otp_request_requires_minimum_mobile_length() {
    let mut state = RegistrationState::default();
    state.form.mobile = "12345".to_string();

    let err = reduce(&state, FlowEvent::OtpRequested, &ReducerRules::default())
        .expect_err("too short");
    assert_eq!(err.kind(), ErrorKind::MobileTooShort);

    state.form.mobile = "1234567890".to_string();
    let transition =
        reduce(&state, FlowEvent::OtpRequested, &ReducerRules::default()).expect("long enough");
    assert!(transition.state.form.is_otp_sent);
    assert_eq!(transition.notices.len(), 1);
    assert_eq!(transition.notices[0].title, "OTP Sent!");
}

#[test]
fn otp_request_keeps_typed_otp() {
    let mut state = ready_state();
    state.form.otp = "4321".to_string();

    let transition =
        reduce(&state, FlowEvent::OtpRequested, &ReducerRules::default()).expect("resend");
    assert_eq!(transition.state.form.otp, "4321");
}

#[test]
fn resolution_rejects_incomplete_form() {
    let mut state = ready_state();
    state.form.code.clear();

    let err = reduce(
        &state,
        FlowEvent::PassesResolved {
            passes: default_pass_catalog(),
        },
        &ReducerRules::default(),
    )
    .expect_err("incomplete");
    assert_eq!(err.kind(), ErrorKind::IncompleteForm);
    assert!(err.message.contains("code"));
}

#[test]
fn three_passes_route_to_selection() {
    let state = selecting_state();

    assert_eq!(state.step, FlowStep::PassSelection);
    assert_eq!(state.passes.len(), 3);
    assert_eq!(state.selected_pass, None);
}

#[test]
fn single_pass_is_selected_implicitly() {
    let pass = AttractionPass::new("7", "Harbour Pass", "Ferries.", PassIcon::Gift);
    let transition = reduce(
        &ready_state(),
        FlowEvent::PassesResolved {
            passes: vec![pass],
        },
        &ReducerRules::default(),
    )
    .expect("single");

    assert_eq!(transition.state.step, FlowStep::Congratulations);
    assert_eq!(transition.state.selected_pass, Some(PassId::new("7")));
    assert_eq!(transition.notices[0].title, "Registration Successful!");
}

#[test]
fn empty_catalog_is_rejected_by_default() {
    let err = reduce(
        &ready_state(),
        FlowEvent::PassesResolved { passes: Vec::new() },
        &ReducerRules::default(),
    )
    .expect_err("empty");
    assert_eq!(err.kind(), ErrorKind::EmptyCatalog);
}

#[test]
fn empty_catalog_can_advance_without_selection() {
    let rules = ReducerRules {
        routing: RoutingPolicy::new(EmptyCatalogPolicy::Advance),
        ..ReducerRules::default()
    };
    let transition = reduce(
        &ready_state(),
        FlowEvent::PassesResolved { passes: Vec::new() },
        &rules,
    )
    .expect("advance");

    assert_eq!(transition.state.step, FlowStep::Congratulations);
    assert_eq!(transition.state.selected_pass, None);
}

#[test]
fn choosing_offered_pass_completes_flow() {
    let transition = reduce(
        &selecting_state(),
        FlowEvent::PassChosen {
            pass_id: PassId::new("2"),
        },
        &ReducerRules::default(),
    )
    .expect("choose");

    assert_eq!(transition.state.step, FlowStep::Congratulations);
    assert_eq!(transition.state.selected_pass, Some(PassId::new("2")));
    assert_eq!(transition.notices[0].title, "Pass Selected!");
}

#[test]
fn choosing_unknown_pass_is_invalid_selection() {
    let err = reduce(
        &selecting_state(),
        FlowEvent::PassChosen {
            pass_id: PassId::new("42"),
        },
        &ReducerRules::default(),
    )
    .expect_err("unknown id");
    assert_eq!(err.kind(), ErrorKind::InvalidSelection);
}

#[test]
fn choosing_before_selection_step_is_step_mismatch() {
    let err = reduce(
        &ready_state(),
        FlowEvent::PassChosen {
            pass_id: PassId::new("1"),
        },
        &ReducerRules::default(),
    )
    .expect_err("wrong step");
    assert_eq!(err.kind(), ErrorKind::StepMismatch);
}

#[test]
fn otp_field_editable_only_after_dispatch() {
    let mut state = RegistrationState::default();
    assert!(!state.is_field_editable(FormField::Otp));
    assert!(state.is_field_editable(FormField::Name));

    state.form.is_otp_sent = true;
    assert!(state.is_field_editable(FormField::Otp));

    state.step = FlowStep::Congratulations;
    assert!(!state.is_field_editable(FormField::Name));
}
