//! The contact form being filled on the manual-fill screen.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::zones::{ContactField, DropTarget};

/// In-progress contact data. Keys match the contact-storage payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub position: String,
    pub phone: String,
    pub additional_phones: Vec<String>,
    pub email: String,
    pub company: String,
    pub website: String,
    pub notes: String,
}

impl ContactRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the record handed over by the previous screen.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse contact record")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize contact record")
    }

    fn slot_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Nickname => &mut self.nickname,
            ContactField::Position => &mut self.position,
            ContactField::Phone => &mut self.phone,
            ContactField::Email => &mut self.email,
            ContactField::Company => &mut self.company,
            ContactField::Website => &mut self.website,
            ContactField::Notes => &mut self.notes,
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Nickname => &self.nickname,
            ContactField::Position => &self.position,
            ContactField::Phone => &self.phone,
            ContactField::Email => &self.email,
            ContactField::Company => &self.company,
            ContactField::Website => &self.website,
            ContactField::Notes => &self.notes,
        }
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Writes only into an already rendered slot. Returns whether it wrote.
    pub fn set_additional_phone(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.additional_phones.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Appends an empty phone slot and returns its index.
    pub fn add_phone_slot(&mut self) -> usize {
        self.additional_phones.push(String::new());
        self.additional_phones.len() - 1
    }

    pub fn value(&self, target: DropTarget) -> Option<&str> {
        match target {
            DropTarget::Field(field) => Some(self.field(field)),
            DropTarget::AdditionalPhone(index) => {
                self.additional_phones.get(index).map(String::as_str)
            }
        }
    }

    /// Overwrites `target` with `value`. Returns `false` for a missing phone slot.
    pub fn assign(&mut self, target: DropTarget, value: impl Into<String>) -> bool {
        match target {
            DropTarget::Field(field) => {
                self.set_field(field, value);
                true
            }
            DropTarget::AdditionalPhone(index) => self.set_additional_phone(index, value),
        }
    }

    pub fn clear(&mut self, target: DropTarget) -> bool {
        self.assign(target, String::new())
    }
}
