//! The closed set of special-priority categories.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Special-priority category attached to an application.
///
/// Each category scales the base priority by a fixed multiplier; a lower
/// multiplier means a lower (better) score. The set is closed: collaborator
/// layers that intake free-form labels parse them via [`FromStr`], which is
/// the only place an unknown category can surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialPriority {
    /// No special priority.
    #[default]
    None,

    /// Medical grounds. Strongest boost.
    Medical,

    /// Sports quota.
    Sports,

    /// Academic excellence.
    #[cfg_attr(feature = "serde", serde(rename = "Academic Excellence"))]
    AcademicExcellence,

    /// Financial aid recipients.
    #[cfg_attr(feature = "serde", serde(rename = "Financial Aid"))]
    FinancialAid,
}

impl SpecialPriority {
    /// All categories, in display order.
    pub const ALL: [SpecialPriority; 5] = [
        SpecialPriority::None,
        SpecialPriority::Medical,
        SpecialPriority::Sports,
        SpecialPriority::AcademicExcellence,
        SpecialPriority::FinancialAid,
    ];

    /// The base-priority multiplier. Lower multiplier = higher priority.
    pub fn multiplier(self) -> f64 {
        match self {
            SpecialPriority::None => 1.0,
            SpecialPriority::Medical => 0.5,
            SpecialPriority::Sports => 0.7,
            SpecialPriority::AcademicExcellence => 0.6,
            SpecialPriority::FinancialAid => 0.8,
        }
    }

    /// Human-readable label, as used on intake forms.
    pub fn label(self) -> &'static str {
        match self {
            SpecialPriority::None => "None",
            SpecialPriority::Medical => "Medical",
            SpecialPriority::Sports => "Sports",
            SpecialPriority::AcademicExcellence => "Academic Excellence",
            SpecialPriority::FinancialAid => "Financial Aid",
        }
    }
}

impl fmt::Display for SpecialPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpecialPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_string()))
    }
}
