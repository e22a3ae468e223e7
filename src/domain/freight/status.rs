//! Lifecycle status and loading mode of a freight record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a freight record.
///
/// The quotation draft is never persisted, so a stored record is either
/// still collecting carrier proposals or already contracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FreightStatus {
    #[default]
    Negotiating,
    Contracted,
}

impl FreightStatus {
    /// Returns true while proposals and field corrections are accepted.
    pub fn is_negotiating(&self) -> bool {
        matches!(self, FreightStatus::Negotiating)
    }

    /// Store-side spelling used by status filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            FreightStatus::Negotiating => "negotiating",
            FreightStatus::Contracted => "contracted",
        }
    }
}

impl StateMachine for FreightStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FreightStatus::*;
        matches!((self, target), (Negotiating, Contracted))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            FreightStatus::Negotiating => vec![FreightStatus::Contracted],
            FreightStatus::Contracted => vec![],
        }
    }
}

impl fmt::Display for FreightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FreightStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "negotiating" => Ok(FreightStatus::Negotiating),
            "contracted" => Ok(FreightStatus::Contracted),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// How the cargo is packed for loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadingMode {
    /// Palletized cargo.
    #[default]
    Paletizados,
    /// Bulk bags.
    Bag,
}

impl LoadingMode {
    /// Display label used by charts and report sections.
    pub fn label(&self) -> &'static str {
        match self {
            LoadingMode::Paletizados => "Paletizados",
            LoadingMode::Bag => "BAG",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadingMode::Paletizados => "paletizados",
            LoadingMode::Bag => "bag",
        }
    }
}

impl fmt::Display for LoadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LoadingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paletizados" => Ok(LoadingMode::Paletizados),
            "bag" => Ok(LoadingMode::Bag),
            other => Err(ValidationError::invalid_format(
                "loading_mode",
                format!("unknown loading mode '{}'", other),
            )),
        }
    }
}
