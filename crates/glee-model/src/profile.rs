//! Import profiles.
//!
//! A profile is the only thing a new import feature has to supply: the
//! fields it expects, the natural key used for duplicate detection, and a
//! couple of example rows for the downloadable template.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::{FieldDescriptor, FieldKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProfile {
    /// Short identifier used on the command line (e.g. `fans`).
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<FieldDescriptor>,
    /// Target field whose value identifies an existing record.
    pub natural_key: String,
    /// Example data rows, in field order, for the template file.
    #[serde(default)]
    pub example_rows: Vec<Vec<String>>,
}

impl ImportProfile {
    /// Checks the profile is usable by the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(ModelError::NoFields {
                profile: self.name.clone(),
            });
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.target.to_lowercase()) {
                return Err(ModelError::DuplicateField {
                    profile: self.name.clone(),
                    target: field.target.clone(),
                });
            }
        }
        if self.field(&self.natural_key).is_none() {
            return Err(ModelError::UnknownNaturalKey {
                profile: self.name.clone(),
                key: self.natural_key.clone(),
            });
        }
        Ok(())
    }

    pub fn field(&self, target: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|field| field.target.eq_ignore_ascii_case(target))
    }

    /// Fresh, unbound copies of the profile's fields for a new session.
    pub fn unbound_fields(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .cloned()
            .map(|mut field| {
                field.source_column = None;
                field.manual = false;
                field
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.label.as_str()).collect()
    }
}

fn person_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("first_name", "First Name").required(),
        FieldDescriptor::new("last_name", "Last Name").required(),
        FieldDescriptor::new("email", "Email")
            .required()
            .with_kind(FieldKind::Email),
    ]
}

fn fans_profile() -> ImportProfile {
    let mut fields = person_fields();
    fields.push(FieldDescriptor::new("phone", "Phone"));
    fields.push(FieldDescriptor::new("class_year", "Class Year").with_kind(FieldKind::Integer));
    ImportProfile {
        name: "fans".to_string(),
        description: "Bulk fan registration".to_string(),
        fields,
        natural_key: "email".to_string(),
        example_rows: vec![
            row(&["John", "Doe", "john@example.com", "555-0100", "2026"]),
            row(&["Jane", "Smith", "jane@example.com", "", ""]),
        ],
    }
}

fn members_profile() -> ImportProfile {
    let mut fields = person_fields();
    fields.push(FieldDescriptor::new("voice_part", "Voice Part"));
    fields.push(FieldDescriptor::new("class_year", "Class Year").with_kind(FieldKind::Integer));
    fields.push(FieldDescriptor::new("phone", "Phone"));
    ImportProfile {
        name: "members".to_string(),
        description: "Member roster".to_string(),
        fields,
        natural_key: "email".to_string(),
        example_rows: vec![row(&[
            "Ada",
            "Lovelace",
            "ada@example.com",
            "Soprano 1",
            "2027",
            "555-0101",
        ])],
    }
}

fn sheet_music_profile() -> ImportProfile {
    ImportProfile {
        name: "sheet-music".to_string(),
        description: "Sheet music library titles".to_string(),
        fields: vec![
            FieldDescriptor::new("title", "Title").required(),
            FieldDescriptor::new("composer", "Composer").required(),
            FieldDescriptor::new("voicing", "Voicing").required(),
            FieldDescriptor::new("arranger", "Arranger"),
            FieldDescriptor::new("copies", "Copies").with_kind(FieldKind::Integer),
        ],
        natural_key: "title".to_string(),
        example_rows: vec![
            row(&["Ave Maria", "Franz Biebl", "SSAA", "", "40"]),
            row(&["Lift Every Voice", "J. Rosamond Johnson", "SATB", "Roland Carter", "65"]),
        ],
    }
}

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Profiles shipped with the tool.
pub fn builtin_profiles() -> Vec<ImportProfile> {
    vec![fans_profile(), members_profile(), sheet_music_profile()]
}

/// Looks a profile up by name (case-insensitive) in `profiles`.
pub fn find_profile<'a>(profiles: &'a [ImportProfile], name: &str) -> Result<&'a ImportProfile> {
    profiles
        .iter()
        .find(|profile| profile.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| ModelError::UnknownProfile(name.to_string()))
}
