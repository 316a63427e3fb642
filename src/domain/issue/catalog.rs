// src/domain/issue/catalog.rs
//! Fixed catalogues offered to citizens when reporting an issue.
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const AREAS: [&str; 19] = [
    "T. Nagar",
    "Adyar",
    "Anna Nagar",
    "Velachery",
    "Tambaram",
    "Poonamallee",
    "Mylapore",
    "Kodambakkam",
    "Nungambakkam",
    "Guindy",
    "Perambur",
    "Royapettah",
    "Chromepet",
    "Thiruvanmiyur",
    "Porur",
    "Saidapet",
    "Ambattur",
    "Washermanpet",
    "Besant Nagar",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IssueCategory {
    RoadDamage,
    WasteManagement,
    StreetLight,
    Drainage,
    Encroachment,
    PublicToilet,
    TreeFall,
    WaterSupply,
    NoisePollution,
    ConstructionDebris,
    Other,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 11] = [
        IssueCategory::RoadDamage,
        IssueCategory::WasteManagement,
        IssueCategory::StreetLight,
        IssueCategory::Drainage,
        IssueCategory::Encroachment,
        IssueCategory::PublicToilet,
        IssueCategory::TreeFall,
        IssueCategory::WaterSupply,
        IssueCategory::NoisePollution,
        IssueCategory::ConstructionDebris,
        IssueCategory::Other,
    ];

    /// Human readable label; this is also the stored representation.
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::RoadDamage => "Potholes / Road Damage",
            IssueCategory::WasteManagement => "Garbage / Waste Management",
            IssueCategory::StreetLight => "Street Light Not Working",
            IssueCategory::Drainage => "Water Logging / Drainage",
            IssueCategory::Encroachment => "Illegal Parking / Encroachment",
            IssueCategory::PublicToilet => "Public Toilet Maintenance",
            IssueCategory::TreeFall => "Tree Fall / Pruning Required",
            IssueCategory::WaterSupply => "Water Supply Issue",
            IssueCategory::NoisePollution => "Noise Pollution",
            IssueCategory::ConstructionDebris => "Construction Debris",
            IssueCategory::Other => "Other",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IssueCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == wanted)
            .ok_or_else(|| DomainError::Validation(format!("unknown issue type '{wanted}'")))
    }
}

impl TryFrom<String> for IssueCategory {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IssueCategory> for String {
    fn from(value: IssueCategory) -> Self {
        value.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Area(&'static str);

impl Area {
    pub fn new(value: impl AsRef<str>) -> DomainResult<Self> {
        let wanted = value.as_ref().trim();
        if wanted.is_empty() {
            return Err(DomainError::Validation("area is required".into()));
        }
        AREAS
            .iter()
            .find(|area| **area == wanted)
            .map(|area| Self(*area))
            .ok_or_else(|| DomainError::Validation(format!("unknown area '{wanted}'")))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip_through_from_str() {
        for category in IssueCategory::ALL {
            assert_eq!(category.label().parse::<IssueCategory>().unwrap(), category);
        }
    }

    #[test]
    fn unknown_category_is_a_validation_error() {
        let err = "Alien Landing".parse::<IssueCategory>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn area_must_come_from_the_fixed_list() {
        assert_eq!(Area::new(" Adyar ").unwrap().as_str(), "Adyar");
        assert!(Area::new("Atlantis").is_err());
        assert!(Area::new("").is_err());
    }
}
