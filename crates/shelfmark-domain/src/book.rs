//! Book domain types.

use serde::{Deserialize, Serialize};

use crate::pagination::Sort;

/// Editorial status of a catalog entry.
///
/// Stored as its snake_case string in the database. Defaults to `Regular`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    Trendy,
    Recommended,
    Popular,
    #[default]
    Regular,
}

impl BookStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trendy => "trendy",
            Self::Recommended => "recommended",
            Self::Popular => "popular",
            Self::Regular => "regular",
        }
    }

    /// Parse the stored string form. Returns `None` for unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "trendy" => Some(Self::Trendy),
            "recommended" => Some(Self::Recommended),
            "popular" => Some(Self::Popular),
            "regular" => Some(Self::Regular),
            _ => None,
        }
    }
}

/// Sort order for the `GET /books` listing endpoint.
///
/// Requires a custom `Deserialize` impl because the wire format is a single
/// hyphenated string (e.g. `"title-asc"`) rather than a nested enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSortBy {
    CreatedAt(Sort),
    Title(Sort),
    PublicationYear(Sort),
    AvgRating(Sort),
}

impl Default for BookSortBy {
    fn default() -> Self {
        Self::CreatedAt(Sort::Desc)
    }
}

impl<'de> Deserialize<'de> for BookSortBy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "created-at-desc" => Ok(Self::CreatedAt(Sort::Desc)),
            "created-at-asc" => Ok(Self::CreatedAt(Sort::Asc)),
            "title-desc" => Ok(Self::Title(Sort::Desc)),
            "title-asc" => Ok(Self::Title(Sort::Asc)),
            "publication-year-desc" => Ok(Self::PublicationYear(Sort::Desc)),
            "publication-year-asc" => Ok(Self::PublicationYear(Sort::Asc)),
            "avg-rating-desc" => Ok(Self::AvgRating(Sort::Desc)),
            "avg-rating-asc" => Ok(Self::AvgRating(Sort::Asc)),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &[
                    "created-at-desc",
                    "created-at-asc",
                    "title-desc",
                    "title-asc",
                    "publication-year-desc",
                    "publication-year-asc",
                    "avg-rating-desc",
                    "avg-rating-asc",
                ],
            )),
        }
    }
}

impl Serialize for BookSortBy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = match self {
            Self::CreatedAt(Sort::Desc) => "created-at-desc",
            Self::CreatedAt(Sort::Asc) => "created-at-asc",
            Self::Title(Sort::Desc) => "title-desc",
            Self::Title(Sort::Asc) => "title-asc",
            Self::PublicationYear(Sort::Desc) => "publication-year-desc",
            Self::PublicationYear(Sort::Asc) => "publication-year-asc",
            Self::AvgRating(Sort::Desc) => "avg-rating-desc",
            Self::AvgRating(Sort::Asc) => "avg-rating-asc",
        };
        serializer.serialize_str(s)
    }
}
