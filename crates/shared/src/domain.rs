use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, RegistrationError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassId(pub String);

impl PassId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PassId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PassId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassIcon {
    Building,
    Mountain,
    Camera,
    #[default]
    Gift,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttractionPass {
    pub id: PassId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: PassIcon,
}

impl AttractionPass {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: PassIcon,
    ) -> Self {
        Self {
            id: PassId::new(id),
            title: title.into(),
            description: description.into(),
            icon,
        }
    }
}

/// The catalog every registration code currently unlocks.
pub fn default_pass_catalog() -> Vec<AttractionPass> {
    vec![
        AttractionPass::new(
            "1",
            "City Explorer Pass",
            "Discover urban attractions, museums, and cultural sites with exclusive discounts.",
            PassIcon::Building,
        ),
        AttractionPass::new(
            "2",
            "Adventure Seeker Pass",
            "Get discounts on outdoor activities, hiking tours, and adventure sports.",
            PassIcon::Mountain,
        ),
        AttractionPass::new(
            "3",
            "Photography Pass",
            "Access scenic viewpoints and photography spots with special rates.",
            PassIcon::Camera,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowStep {
    #[default]
    Registration,
    PassSelection,
    Congratulations,
}

impl FlowStep {
    pub fn is_terminal(self) -> bool {
        self == FlowStep::Congratulations
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Mobile,
    Code,
    Otp,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Mobile,
        FormField::Code,
        FormField::Otp,
    ];

    /// Fields that must be non-empty before submission, in prompt order.
    pub const REQUIRED: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Code,
        FormField::Otp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Mobile => "mobile",
            FormField::Code => "code",
            FormField::Otp => "otp",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                RegistrationError::new(ErrorKind::UnknownField, format!("unknown form field '{s}'"))
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub code: String,
    pub otp: String,
    pub is_otp_sent: bool,
}

impl RegistrationForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Mobile => &self.mobile,
            FormField::Code => &self.code,
            FormField::Otp => &self.otp,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Mobile => &mut self.mobile,
            FormField::Code => &mut self.code,
            FormField::Otp => &mut self.otp,
        };
        *slot = value.into();
    }

    /// Required fields that are still empty. Whitespace counts as content.
    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Mobile length in characters, not bytes.
    pub fn mobile_len(&self) -> usize {
        self.mobile.chars().count()
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
