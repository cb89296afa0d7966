//! Text rendering for each wizard step.

use std::fmt::Write as _;

use registration_core::RegistrationState;
use shared::{
    domain::{AttractionPass, FlowStep, FormField, PassIcon},
    protocol::Notice,
};
use url::Url;

pub fn banner() -> String {
    [
        "==============================================================",
        "  Register your code and unlock discounted experiences",
        "  with the Attraction Pass!",
        "",
        "  The Attraction Pass includes a collection of discount coupon",
        "  codes you can use to book top attractions during your",
        "  upcoming trip.",
        "==============================================================",
    ]
    .join("\n")
}

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Full Name",
        FormField::Email => "Email Address",
        FormField::Mobile => "Mobile Number",
        FormField::Code => "Attraction Pass Code",
        FormField::Otp => "OTP Verification",
    }
}

fn icon_glyph(icon: PassIcon) -> &'static str {
    match icon {
        PassIcon::Building => "[city]",
        PassIcon::Mountain => "[peak]",
        PassIcon::Camera => "[lens]",
        PassIcon::Gift => "[gift]",
    }
}

pub fn render_step(state: &RegistrationState, min_mobile_len: usize, profile_url: &Url) -> String {
    match state.step {
        FlowStep::Registration => render_registration(state, min_mobile_len),
        FlowStep::PassSelection => render_pass_selection(&state.passes),
        FlowStep::Congratulations => render_congratulations(profile_url),
    }
}

pub fn render_registration(state: &RegistrationState, min_mobile_len: usize) -> String {
    let form = &state.form;
    let mut out = String::new();
    let _ = writeln!(out, "Complete Your Registration");
    let _ = writeln!(out, "Fill in your details to activate your Attraction Pass");
    let _ = writeln!(out);
    for field in FormField::ALL {
        let value = form.get(field);
        let shown = if value.is_empty() { "-" } else { value };
        let suffix = match field {
            FormField::Otp if !form.is_otp_sent => "  (request an OTP first)",
            FormField::Otp => "  (OTP sent to your mobile number)",
            _ => "",
        };
        let _ = writeln!(out, "  {:<22}{shown}{suffix}", field_label(field));
    }
    let _ = writeln!(out);
    let otp_state = if state.can_request_otp(min_mobile_len) {
        "available"
    } else {
        "disabled"
    };
    let submit_state = if state.can_submit() {
        "available"
    } else {
        "disabled"
    };
    let _ = writeln!(out, "  [Send OTP: {otp_state}]  [Verify & Continue: {submit_state}]");
    out
}

pub fn render_pass_selection(passes: &[AttractionPass]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Choose Your Attraction Pass");
    let _ = writeln!(
        out,
        "Your code is valid for multiple passes. Select the one that best fits your travel plans."
    );
    let _ = writeln!(out);
    for pass in passes {
        let _ = writeln!(out, "  {} {}  (id {})", icon_glyph(pass.icon), pass.title, pass.id);
        let _ = writeln!(out, "      {}", pass.description);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  Type `select <id>` to choose a pass.");
    out
}

pub fn render_congratulations(profile_url: &Url) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  *  .  *  .  *  .  *  .  *");
    let _ = writeln!(out, "Your Attraction Pass is activated!");
    let _ = writeln!(
        out,
        "Congratulations! You can now access exclusive discounts and special offers for top attractions. Start planning your amazing journey!"
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  View Attraction Pass Codes: type `open` ({profile_url})");
    let _ = writeln!(out, "  Ready for your next adventure!");
    out
}

pub fn render_notice(notice: &Notice) -> String {
    format!("** {} {}", notice.title, notice.description)
}

pub fn help_text(step: FlowStep) -> &'static str {
    match step {
        FlowStep::Registration => {
            "Commands: set <name|email|mobile|otp|code> <value>, send-otp, submit, show, help, quit"
        }
        FlowStep::PassSelection => "Commands: select <id>, show, help, quit",
        FlowStep::Congratulations => "Commands: open, show, help, quit",
    }
}
