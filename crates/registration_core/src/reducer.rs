//! Pure registration flow transitions: (state, event) -> next state plus notices.

use shared::{
    domain::{AttractionPass, FlowStep, FormField, PassId, RegistrationForm},
    error::{ErrorKind, RegistrationError},
    protocol::{FlowEvent, Notice},
};

use crate::routing::{Route, RoutingPolicy};

pub const DEFAULT_MIN_MOBILE_LEN: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationState {
    pub step: FlowStep,
    pub form: RegistrationForm,
    /// Passes resolved for the submitted code; empty until submission succeeds.
    pub passes: Vec<AttractionPass>,
    pub selected_pass: Option<PassId>,
}

impl RegistrationState {
    pub fn can_request_otp(&self, min_mobile_len: usize) -> bool {
        self.step == FlowStep::Registration && self.form.mobile_len() >= min_mobile_len
    }

    pub fn can_submit(&self) -> bool {
        self.step == FlowStep::Registration && self.form.is_complete()
    }

    pub fn is_field_editable(&self, field: FormField) -> bool {
        if self.step != FlowStep::Registration {
            return false;
        }
        field != FormField::Otp || self.form.is_otp_sent
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReducerRules {
    pub min_mobile_len: usize,
    pub routing: RoutingPolicy,
}

impl Default for ReducerRules {
    fn default() -> Self {
        Self {
            min_mobile_len: DEFAULT_MIN_MOBILE_LEN,
            routing: RoutingPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: RegistrationState,
    pub notices: Vec<Notice>,
}

impl Transition {
    fn quiet(state: RegistrationState) -> Self {
        Self {
            state,
            notices: Vec::new(),
        }
    }

    fn announce(state: RegistrationState, notice: Notice) -> Self {
        Self {
            state,
            notices: vec![notice],
        }
    }
}

pub fn reduce(
    state: &RegistrationState,
    event: FlowEvent,
    rules: &ReducerRules,
) -> Result<Transition, RegistrationError> {
    match event {
        FlowEvent::FieldUpdated { field, value } => {
            let mut next = state.clone();
            next.form.set(field, value);
            Ok(Transition::quiet(next))
        }
        FlowEvent::OtpRequested => {
            expect_step(state, FlowStep::Registration, "request an OTP")?;
            let len = state.form.mobile_len();
            if len < rules.min_mobile_len {
                return Err(RegistrationError::new(
                    ErrorKind::MobileTooShort,
                    format!(
                        "mobile number has {len} characters, at least {} required",
                        rules.min_mobile_len
                    ),
                ));
            }
            let mut next = state.clone();
            next.form.is_otp_sent = true;
            Ok(Transition::announce(next, Notice::otp_sent()))
        }
        FlowEvent::PassesResolved { passes } => {
            expect_step(state, FlowStep::Registration, "submit the registration")?;
            ensure_complete(&state.form)?;
            let mut next = state.clone();
            match rules.routing.decide(passes.len()) {
                Route::Reject => {
                    return Err(RegistrationError::new(
                        ErrorKind::EmptyCatalog,
                        "registration code does not unlock any attraction pass",
                    ));
                }
                Route::Congratulations => {
                    next.selected_pass = passes.first().map(|pass| pass.id.clone());
                    next.step = FlowStep::Congratulations;
                }
                Route::PassSelection => {
                    next.step = FlowStep::PassSelection;
                }
            }
            next.passes = passes;
            Ok(Transition::announce(next, Notice::registration_successful()))
        }
        FlowEvent::PassChosen { pass_id } => {
            expect_step(state, FlowStep::PassSelection, "select a pass")?;
            if !state.passes.iter().any(|pass| pass.id == pass_id) {
                return Err(RegistrationError::new(
                    ErrorKind::InvalidSelection,
                    format!("pass '{pass_id}' is not offered for this code"),
                ));
            }
            let mut next = state.clone();
            next.selected_pass = Some(pass_id);
            next.step = FlowStep::Congratulations;
            Ok(Transition::announce(next, Notice::pass_selected()))
        }
    }
}

pub(crate) fn expect_step(
    state: &RegistrationState,
    expected: FlowStep,
    action: &str,
) -> Result<(), RegistrationError> {
    if state.step == expected {
        return Ok(());
    }
    Err(RegistrationError::new(
        ErrorKind::StepMismatch,
        format!("cannot {action} while on the {:?} step", state.step),
    ))
}

pub(crate) fn ensure_complete(form: &RegistrationForm) -> Result<(), RegistrationError> {
    let missing = form.missing_required();
    if missing.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = missing.iter().map(|field| field.as_str()).collect();
    Err(RegistrationError::new(
        ErrorKind::IncompleteForm,
        format!("missing required fields: {}", names.join(", ")),
    ))
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
