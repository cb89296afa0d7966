//! Registration flow controller: owns the flow state and drives the reducer
//! with results from the pass catalog.

use std::time::Duration;

use shared::{
    domain::{AttractionPass, FlowStep, FormField, PassId, RegistrationForm},
    error::{ErrorKind, RegistrationError},
    protocol::FlowEvent,
};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    catalog::PassCatalog,
    navigate::ExternalNavigator,
    notify::NotificationSink,
    reducer::{
        ensure_complete, expect_step, reduce, ReducerRules, RegistrationState,
        DEFAULT_MIN_MOBILE_LEN,
    },
    routing::{EmptyCatalogPolicy, RoutingPolicy},
};

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub min_mobile_len: usize,
    pub lookup_timeout: Duration,
    pub empty_catalog: EmptyCatalogPolicy,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            min_mobile_len: DEFAULT_MIN_MOBILE_LEN,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            empty_catalog: EmptyCatalogPolicy::default(),
        }
    }
}

impl ControllerOptions {
    fn rules(&self) -> ReducerRules {
        ReducerRules {
            min_mobile_len: self.min_mobile_len,
            routing: RoutingPolicy::new(self.empty_catalog),
        }
    }
}

pub struct RegistrationController<C: PassCatalog, N: NotificationSink> {
    session_id: Uuid,
    state: RegistrationState,
    catalog: C,
    sink: N,
    options: ControllerOptions,
}

impl<C: PassCatalog, N: NotificationSink> RegistrationController<C, N> {
    pub fn new(catalog: C, sink: N) -> Self {
        Self::with_options(catalog, sink, ControllerOptions::default())
    }

    pub fn with_options(catalog: C, sink: N, options: ControllerOptions) -> Self {
        let session_id = Uuid::new_v4();
        debug!(%session_id, ?options, "registration session started");
        Self {
            session_id,
            state: RegistrationState::default(),
            catalog,
            sink,
            options,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn step(&self) -> FlowStep {
        self.state.step
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.state.form
    }

    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Passes offered for the submitted code. Empty before submission.
    pub fn passes(&self) -> &[AttractionPass] {
        &self.state.passes
    }

    pub fn selected_pass(&self) -> Option<&PassId> {
        self.state.selected_pass.as_ref()
    }

    pub fn can_request_otp(&self) -> bool {
        self.state.can_request_otp(self.options.min_mobile_len)
    }

    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    pub fn is_field_editable(&self, field: FormField) -> bool {
        self.state.is_field_editable(field)
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        let event = FlowEvent::FieldUpdated {
            field,
            value: value.into(),
        };
        // The reducer accepts field updates in every step.
        if let Err(err) = self.apply(event) {
            warn!(session_id = %self.session_id, %field, error = %err, "field update rejected");
        }
    }

    pub fn request_otp(&mut self) -> Result<(), RegistrationError> {
        let resend = self.state.form.is_otp_sent;
        self.apply(FlowEvent::OtpRequested)?;
        if resend {
            debug!(session_id = %self.session_id, "otp re-requested; previous dispatch still treated as valid");
        }
        info!(session_id = %self.session_id, "otp dispatched");
        Ok(())
    }

    /// Verifies the form, resolves the passes for the entered code and routes the flow.
    /// Catalog failures leave the step and every form field untouched.
    pub async fn submit_registration(&mut self) -> Result<FlowStep, RegistrationError> {
        expect_step(&self.state, FlowStep::Registration, "submit the registration")?;
        ensure_complete(&self.state.form)?;

        let code = self.state.form.code.clone();
        let lookup = tokio::time::timeout(self.options.lookup_timeout, self.catalog.lookup(&code));
        let passes = match lookup.await {
            Ok(Ok(passes)) => passes,
            Ok(Err(err)) => {
                warn!(session_id = %self.session_id, error = %err, "pass catalog lookup failed");
                return Err(RegistrationError::new(
                    ErrorKind::CatalogUnavailable,
                    format!("pass catalog lookup failed: {err}"),
                ));
            }
            Err(_) => {
                warn!(
                    session_id = %self.session_id,
                    lookup_timeout = ?self.options.lookup_timeout,
                    "pass catalog lookup timed out"
                );
                return Err(RegistrationError::new(
                    ErrorKind::CatalogUnavailable,
                    "pass catalog lookup timed out",
                ));
            }
        };

        let count = passes.len();
        self.apply(FlowEvent::PassesResolved { passes })?;
        info!(
            session_id = %self.session_id,
            passes = count,
            step = ?self.state.step,
            "registration verified"
        );
        Ok(self.state.step)
    }

    pub fn select_pass(&mut self, pass_id: impl Into<PassId>) -> Result<(), RegistrationError> {
        let pass_id = pass_id.into();
        self.apply(FlowEvent::PassChosen {
            pass_id: pass_id.clone(),
        })?;
        info!(session_id = %self.session_id, %pass_id, "attraction pass selected");
        Ok(())
    }

    /// Opens the profile page once the pass is active. Navigation failures are logged, not returned.
    pub fn open_profile(
        &self,
        navigator: &dyn ExternalNavigator,
        profile_url: &Url,
    ) -> Result<(), RegistrationError> {
        expect_step(&self.state, FlowStep::Congratulations, "open the profile page")?;
        if let Err(err) = navigator.open(profile_url) {
            warn!(session_id = %self.session_id, url = %profile_url, error = %err, "failed to open profile page");
        }
        Ok(())
    }

    fn apply(&mut self, event: FlowEvent) -> Result<(), RegistrationError> {
        let name = event.name();
        let transition = reduce(&self.state, event, &self.options.rules()).map_err(|err| {
            debug!(session_id = %self.session_id, event = name, error = %err, "transition rejected");
            err
        })?;
        if transition.state.step != self.state.step {
            debug!(
                session_id = %self.session_id,
                from = ?self.state.step,
                to = ?transition.state.step,
                "flow step changed"
            );
            if transition.state.step.is_terminal() {
                info!(
                    session_id = %self.session_id,
                    selected_pass = ?transition.state.selected_pass,
                    "attraction pass activated"
                );
            }
        }
        self.state = transition.state;
        for notice in &transition.notices {
            self.sink.notify(notice);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
