//! Animal record, field names, and sparse patch types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Classification, DietType, RecordId};

/// One animal record. Unset text fields are empty strings, unset enum fields
/// and notes are `None`, and unset numeric fields are zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Unique record key.
    pub id: RecordId,
    /// Personal name of the animal.
    pub nickname: String,
    /// Taxonomic class.
    pub classification: Option<Classification>,
    /// Taxonomic family.
    pub family: String,
    /// Taxonomic genus.
    pub genus: String,
    /// Taxonomic species.
    pub species: String,
    /// Main diet.
    pub diet_type: Option<DietType>,
    /// Age in years.
    pub age: i32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Free-form notes. `None` when the source had no notes token; an empty
    /// string is a present, blank note.
    pub notes: Option<String>,
}

impl Record {
    /// Empty record carrying only `id`.
    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Field names of [`Record`], in positional source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// [`Record::id`].
    Id,
    /// [`Record::nickname`].
    Nickname,
    /// [`Record::classification`].
    Classification,
    /// [`Record::family`].
    Family,
    /// [`Record::genus`].
    Genus,
    /// [`Record::species`].
    Species,
    /// [`Record::diet_type`].
    DietType,
    /// [`Record::age`].
    Age,
    /// [`Record::weight`].
    Weight,
    /// [`Record::notes`].
    Notes,
}

impl RecordField {
    /// Every field, in positional source order.
    pub const ALL: [Self; 10] = [
        Self::Id,
        Self::Nickname,
        Self::Classification,
        Self::Family,
        Self::Genus,
        Self::Species,
        Self::DietType,
        Self::Age,
        Self::Weight,
        Self::Notes,
    ];

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Nickname => "nickname",
            Self::Classification => "classification",
            Self::Family => "family",
            Self::Genus => "genus",
            Self::Species => "species",
            Self::DietType => "diet type",
            Self::Age => "age",
            Self::Weight => "weight",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sparse patch where each `Some` field overwrites the record value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    /// Optional replacement for id.
    pub id: Option<RecordId>,
    /// Optional replacement for nickname.
    pub nickname: Option<String>,
    /// Optional replacement for classification.
    pub classification: Option<Classification>,
    /// Optional replacement for family.
    pub family: Option<String>,
    /// Optional replacement for genus.
    pub genus: Option<String>,
    /// Optional replacement for species.
    pub species: Option<String>,
    /// Optional replacement for diet type.
    pub diet_type: Option<DietType>,
    /// Optional replacement for age.
    pub age: Option<i32>,
    /// Optional replacement for weight.
    pub weight: Option<f64>,
    /// Optional replacement for notes.
    pub notes: Option<String>,
}

impl RecordPatch {
    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies this patch in place to `rec`.
    pub fn apply_to(&self, rec: &mut Record) {
        if let Some(v) = &self.id {
            rec.id = v.clone();
        }
        if let Some(v) = &self.nickname {
            rec.nickname = v.clone();
        }
        if let Some(v) = self.classification {
            rec.classification = Some(v);
        }
        if let Some(v) = &self.family {
            rec.family = v.clone();
        }
        if let Some(v) = &self.genus {
            rec.genus = v.clone();
        }
        if let Some(v) = &self.species {
            rec.species = v.clone();
        }
        if let Some(v) = self.diet_type {
            rec.diet_type = Some(v);
        }
        if let Some(v) = self.age {
            rec.age = v;
        }
        if let Some(v) = self.weight {
            rec.weight = v;
        }
        if let Some(v) = &self.notes {
            rec.notes = Some(v.clone());
        }
    }
}
