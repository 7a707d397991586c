//! Shared primitive IDs and closed taxonomy enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique record key.
pub type RecordId = String;

/// Taxonomic class bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Warm-blooded, fur-bearing animals.
    Mammal,
    /// Feathered animals.
    Bird,
    /// Cold-blooded scaled animals.
    Reptile,
    /// Animals living both in water and on land.
    Amphibian,
    /// Gilled aquatic animals.
    Fish,
    /// Animals without a backbone.
    Invertebrate,
}

impl Classification {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Mammal,
        Self::Bird,
        Self::Reptile,
        Self::Amphibian,
        Self::Fish,
        Self::Invertebrate,
    ];

    /// Canonical text name, as stored and serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mammal => "mammal",
            Self::Bird => "bird",
            Self::Reptile => "reptile",
            Self::Amphibian => "amphibian",
            Self::Fish => "fish",
            Self::Invertebrate => "invertebrate",
        }
    }

    /// Case-insensitive lookup of a trimmed token. Unknown names yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main diet bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    /// Meat eater.
    Carnivore,
    /// Plant eater.
    Herbivore,
    /// Mixed diet.
    Omnivore,
    /// Insect eater.
    Insectivore,
    /// Fish eater.
    Piscivore,
    /// Fruit eater.
    Frugivore,
}

impl DietType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Carnivore,
        Self::Herbivore,
        Self::Omnivore,
        Self::Insectivore,
        Self::Piscivore,
        Self::Frugivore,
    ];

    /// Canonical text name, as stored and serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Carnivore => "carnivore",
            Self::Herbivore => "herbivore",
            Self::Omnivore => "omnivore",
            Self::Insectivore => "insectivore",
            Self::Piscivore => "piscivore",
            Self::Frugivore => "frugivore",
        }
    }

    /// Case-insensitive lookup of a trimmed token. Unknown names yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
