//! Application pipeline status.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ApplicationValidationError;

/// Where an application sits in the hiring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Saved for later; the default a new-entry form offers.
    #[default]
    Wishlist,
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    /// Every status, in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Wishlist,
        Self::Applied,
        Self::Interview,
        Self::Offer,
        Self::Rejected,
    ];

    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wishlist => "wishlist",
            Self::Applied => "applied",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ApplicationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ApplicationValidationError::InvalidStatus {
                value: value.to_owned(),
            })
    }
}
