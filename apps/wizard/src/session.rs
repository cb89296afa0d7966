//! Line-oriented wizard session: reads commands, forwards them to the
//! registration controller and re-renders whenever the step changes.

use std::io::{BufRead, Write};

use anyhow::Result;
use registration_core::{
    BufferedNotificationSink, ExternalNavigator, PassCatalog, RegistrationController,
    TracingNotificationSink,
};
use shared::domain::{FlowStep, FormField};
use tracing::debug;
use url::Url;

use crate::view;

pub type WizardSink = (BufferedNotificationSink, TracingNotificationSink);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: FormField, value: String },
    SendOtp,
    Submit,
    Select(String),
    Open,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };
    match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim_start()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            let field = field
                .to_ascii_lowercase()
                .parse::<FormField>()
                .map_err(|err| err.message)?;
            Ok(Command::Set {
                field,
                value: value.to_string(),
            })
        }
        "send-otp" | "otp" => Ok(Command::SendOtp),
        "submit" | "verify" => Ok(Command::Submit),
        "select" if !rest.is_empty() => Ok(Command::Select(rest.to_string())),
        "select" => Err("usage: select <id>".to_string()),
        "open" => Ok(Command::Open),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}'; type `help`")),
    }
}

pub struct WizardSession<C: PassCatalog, W: Write> {
    controller: RegistrationController<C, WizardSink>,
    notices: BufferedNotificationSink,
    navigator: Box<dyn ExternalNavigator>,
    profile_url: Url,
    out: W,
}

impl<C: PassCatalog, W: Write> WizardSession<C, W> {
    pub fn new(
        controller: RegistrationController<C, WizardSink>,
        notices: BufferedNotificationSink,
        navigator: Box<dyn ExternalNavigator>,
        profile_url: Url,
        out: W,
    ) -> Self {
        Self {
            controller,
            notices,
            navigator,
            profile_url,
            out,
        }
    }

    pub fn controller(&self) -> &RegistrationController<C, WizardSink> {
        &self.controller
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        writeln!(self.out, "{}", view::banner())?;
        self.render()?;
        writeln!(self.out, "{}", view::help_text(self.controller.step()))?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.out, "! {message}")?;
                    continue;
                }
            };
            debug!(session_id = %self.controller.session_id(), ?command, "wizard command");
            if command == Command::Quit {
                break;
            }

            let before = self.controller.step();
            self.handle(command).await?;
            self.flush_notices()?;
            if self.controller.step() != before {
                self.render()?;
                writeln!(self.out, "{}", view::help_text(self.controller.step()))?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    async fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Set { field, value } => {
                if !self.controller.is_field_editable(field) {
                    let reason = if field == FormField::Otp
                        && self.controller.step() == FlowStep::Registration
                    {
                        "request an OTP before entering it"
                    } else {
                        "the form is no longer editable"
                    };
                    writeln!(self.out, "! {field} is disabled: {reason}")?;
                    return Ok(());
                }
                self.controller.update_field(field, value);
                writeln!(self.out, "  {field} updated")?;
            }
            Command::SendOtp => {
                if !self.controller.can_request_otp() {
                    writeln!(
                        self.out,
                        "! Send OTP is disabled: enter a mobile number with at least {} characters",
                        self.controller.options().min_mobile_len
                    )?;
                    return Ok(());
                }
                if let Err(err) = self.controller.request_otp() {
                    writeln!(self.out, "! {}", err.message)?;
                }
            }
            Command::Submit => {
                if self.controller.step() == FlowStep::Registration && !self.controller.can_submit() {
                    let missing: Vec<&str> = self
                        .controller
                        .form()
                        .missing_required()
                        .into_iter()
                        .map(FormField::as_str)
                        .collect();
                    writeln!(
                        self.out,
                        "! Verify & Continue is disabled: missing {}",
                        missing.join(", ")
                    )?;
                    return Ok(());
                }
                if let Err(err) = self.controller.submit_registration().await {
                    writeln!(self.out, "! {}", err.message)?;
                }
            }
            Command::Select(id) => {
                if let Err(err) = self.controller.select_pass(id) {
                    writeln!(self.out, "! {}", err.message)?;
                }
            }
            Command::Open => {
                match self
                    .controller
                    .open_profile(self.navigator.as_ref(), &self.profile_url)
                {
                    Ok(()) => writeln!(self.out, "  Opening {}", self.profile_url)?,
                    Err(err) => writeln!(self.out, "! {}", err.message)?,
                }
            }
            Command::Show => self.render()?,
            Command::Help => writeln!(self.out, "{}", view::help_text(self.controller.step()))?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let rendered = view::render_step(
            self.controller.state(),
            self.controller.options().min_mobile_len,
            &self.profile_url,
        );
        writeln!(self.out, "{rendered}")?;
        Ok(())
    }

    fn flush_notices(&mut self) -> Result<()> {
        for notice in self.notices.drain() {
            writeln!(self.out, "{}", view::render_notice(&notice))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
