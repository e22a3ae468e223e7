//! Destination state extraction.
//!
//! Destinations are typed by hand as `"<city>/<UF>"`. The last `/` segment,
//! trimmed and uppercased, is matched against the 27 federative units.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The 26 Brazilian states plus the Federal District.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BrazilianState {
    AC,
    AL,
    AP,
    AM,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MT,
    MS,
    MG,
    PA,
    PB,
    PR,
    PE,
    PI,
    RJ,
    RN,
    RS,
    RO,
    RR,
    SC,
    SP,
    SE,
    TO,
}

impl BrazilianState {
    pub const ALL: [BrazilianState; 27] = [
        BrazilianState::AC,
        BrazilianState::AL,
        BrazilianState::AP,
        BrazilianState::AM,
        BrazilianState::BA,
        BrazilianState::CE,
        BrazilianState::DF,
        BrazilianState::ES,
        BrazilianState::GO,
        BrazilianState::MA,
        BrazilianState::MT,
        BrazilianState::MS,
        BrazilianState::MG,
        BrazilianState::PA,
        BrazilianState::PB,
        BrazilianState::PR,
        BrazilianState::PE,
        BrazilianState::PI,
        BrazilianState::RJ,
        BrazilianState::RN,
        BrazilianState::RS,
        BrazilianState::RO,
        BrazilianState::RR,
        BrazilianState::SC,
        BrazilianState::SP,
        BrazilianState::SE,
        BrazilianState::TO,
    ];

    /// Two-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            BrazilianState::AC => "AC",
            BrazilianState::AL => "AL",
            BrazilianState::AP => "AP",
            BrazilianState::AM => "AM",
            BrazilianState::BA => "BA",
            BrazilianState::CE => "CE",
            BrazilianState::DF => "DF",
            BrazilianState::ES => "ES",
            BrazilianState::GO => "GO",
            BrazilianState::MA => "MA",
            BrazilianState::MT => "MT",
            BrazilianState::MS => "MS",
            BrazilianState::MG => "MG",
            BrazilianState::PA => "PA",
            BrazilianState::PB => "PB",
            BrazilianState::PR => "PR",
            BrazilianState::PE => "PE",
            BrazilianState::PI => "PI",
            BrazilianState::RJ => "RJ",
            BrazilianState::RN => "RN",
            BrazilianState::RS => "RS",
            BrazilianState::RO => "RO",
            BrazilianState::RR => "RR",
            BrazilianState::SC => "SC",
            BrazilianState::SP => "SP",
            BrazilianState::SE => "SE",
            BrazilianState::TO => "TO",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.code() == code)
    }
}

impl fmt::Display for BrazilianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BrazilianState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.trim().to_uppercase()).ok_or_else(|| {
            ValidationError::invalid_format("state", format!("'{}' is not a Brazilian state", s))
        })
    }
}

/// Bucket a destination falls into for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DestinationState {
    Known(BrazilianState),
    /// Destination present but its state is not recognized.
    Other,
    /// No destination at all.
    Unspecified,
}

impl DestinationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationState::Known(state) => state.code(),
            DestinationState::Other => "Outro",
            DestinationState::Unspecified => "N/A",
        }
    }

    pub fn known(&self) -> Option<BrazilianState> {
        match self {
            DestinationState::Known(state) => Some(*state),
            _ => None,
        }
    }
}

impl fmt::Display for DestinationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DestinationState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Maps a free-text destination to its state bucket.
pub fn extract_state(destination: &str) -> DestinationState {
    if destination.trim().is_empty() {
        return DestinationState::Unspecified;
    }
    let token = destination
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim()
        .to_uppercase();

    match BrazilianState::from_code(&token) {
        Some(state) => DestinationState::Known(state),
        None => DestinationState::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extracts_known_state() {
        assert_eq!(
            extract_state("Sorocaba/SP"),
            DestinationState::Known(BrazilianState::SP)
        );
    }

    #[test]
    fn unknown_code_is_other() {
        assert_eq!(extract_state("Somewhere/XX"), DestinationState::Other);
    }

    #[test]
    fn empty_destination_is_unspecified() {
        assert_eq!(extract_state(""), DestinationState::Unspecified);
        assert_eq!(extract_state("   "), DestinationState::Unspecified);
    }

    #[test]
    fn token_without_slash_is_other() {
        assert_eq!(extract_state("NoSlashToken"), DestinationState::Other);
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(
            extract_state("Rio Branco / ac "),
            DestinationState::Known(BrazilianState::AC)
        );
    }

    #[test]
    fn last_segment_wins() {
        assert_eq!(
            extract_state("Campo Grande/MS/Centro/MT"),
            DestinationState::Known(BrazilianState::MT)
        );
    }

    #[test]
    fn bare_state_code_counts() {
        assert_eq!(extract_state("df"), DestinationState::Known(BrazilianState::DF));
    }

    #[test]
    fn list_has_twenty_seven_unique_codes() {
        let mut codes: Vec<_> = BrazilianState::ALL.iter().map(|s| s.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 27);
    }

    #[test]
    fn serializes_as_label() {
        assert_eq!(serde_json::to_string(&DestinationState::Other).unwrap(), "\"Outro\"");
        assert_eq!(serde_json::to_string(&DestinationState::Unspecified).unwrap(), "\"N/A\"");
        assert_eq!(
            serde_json::to_string(&DestinationState::Known(BrazilianState::PR)).unwrap(),
            "\"PR\""
        );
    }

    #[test]
    fn parses_state_codes() {
        assert_eq!("rj".parse::<BrazilianState>(), Ok(BrazilianState::RJ));
        assert!("XX".parse::<BrazilianState>().is_err());
    }

    proptest! {
        #[test]
        fn every_state_is_recognized_in_any_city(city in "[A-Za-z ]{0,20}", idx in 0usize..27) {
            let state = BrazilianState::ALL[idx];
            let destination = format!("{}/{}", city, state.code().to_lowercase());
            prop_assert_eq!(extract_state(&destination), DestinationState::Known(state));
        }

        #[test]
        fn extraction_is_deterministic(destination in ".*") {
            prop_assert_eq!(extract_state(&destination), extract_state(&destination));
        }
    }
}
