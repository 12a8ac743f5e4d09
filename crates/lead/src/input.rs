use std::collections::BTreeMap;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

pub const INVALID_EMAIL: &str = "invalid_email";

/// Raw values as typed in the form.
#[derive(Debug, Clone, Default, Validate)]
pub struct LeadInput {
    pub name: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: String,
}

impl LeadInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into().trim().to_owned();

        Self {
            name: (!name.is_empty()).then_some(name),
            email: email.into().trim().to_owned(),
        }
    }

    pub fn validate_lead(&self) -> Result<Lead, FieldErrors> {
        self.validate()?;

        Ok(Lead {
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }
}

/// A lead that passed validation. Serializes as the lead API request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lead {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

/// Field name to message key, one entry per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let err = errs.first()?;
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());

                Some((field.to_string(), message))
            })
            .collect();

        Self(fields)
    }
}
