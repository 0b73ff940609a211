//! Readjustment (installment indexation) types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Ifrs16Error;

/// How the installment is readjusted on each anniversary.
///
/// Serialized with the lowercase codes stored alongside archived contract
/// versions (`manual`, `igpm`, `ipca`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReadjustmentKind {
    /// Fixed annual percentage typed in with the contract
    #[default]
    Manual,
    /// IGP-M general price index
    Igpm,
    /// IPCA consumer price index
    Ipca,
    /// SELIC policy rate
    Selic,
    /// CDI interbank rate
    Cdi,
    /// INPC consumer price index
    Inpc,
    /// TR reference rate
    Tr,
}

impl ReadjustmentKind {
    /// All kinds, manual first.
    pub const ALL: [ReadjustmentKind; 7] = [
        ReadjustmentKind::Manual,
        ReadjustmentKind::Igpm,
        ReadjustmentKind::Ipca,
        ReadjustmentKind::Selic,
        ReadjustmentKind::Cdi,
        ReadjustmentKind::Inpc,
        ReadjustmentKind::Tr,
    ];

    /// Returns the storage code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ReadjustmentKind::Manual => "manual",
            ReadjustmentKind::Igpm => "igpm",
            ReadjustmentKind::Ipca => "ipca",
            ReadjustmentKind::Selic => "selic",
            ReadjustmentKind::Cdi => "cdi",
            ReadjustmentKind::Inpc => "inpc",
            ReadjustmentKind::Tr => "tr",
        }
    }

    /// Returns true if the rate comes from a published economic index.
    #[must_use]
    pub fn is_index_linked(&self) -> bool {
        !matches!(self, ReadjustmentKind::Manual)
    }
}

impl fmt::Display for ReadjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadjustmentKind::Manual => "Manual",
            ReadjustmentKind::Igpm => "IGP-M",
            ReadjustmentKind::Ipca => "IPCA",
            ReadjustmentKind::Selic => "SELIC",
            ReadjustmentKind::Cdi => "CDI",
            ReadjustmentKind::Inpc => "INPC",
            ReadjustmentKind::Tr => "TR",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ReadjustmentKind {
    type Err = Ifrs16Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "");
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == normalized)
            .ok_or_else(|| Ifrs16Error::UnknownReadjustmentKind {
                value: s.to_string(),
            })
    }
}

/// How often an index-linked contract is remeasured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Periodicity {
    /// Once a year, in the readjustment month, using the trailing 12-month index
    #[default]
    #[serde(rename = "anual")]
    Annual,
    /// Every month, using the latest monthly index
    #[serde(rename = "mensal")]
    Monthly,
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Periodicity::Annual => "Annual",
            Periodicity::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("IGP-M".parse::<ReadjustmentKind>().unwrap(), ReadjustmentKind::Igpm);
        assert_eq!(" ipca ".parse::<ReadjustmentKind>().unwrap(), ReadjustmentKind::Ipca);
        assert_eq!("manual".parse::<ReadjustmentKind>().unwrap(), ReadjustmentKind::Manual);
        assert!("libor".parse::<ReadjustmentKind>().is_err());
    }

    #[test]
    fn test_index_linked() {
        assert!(!ReadjustmentKind::Manual.is_index_linked());
        assert!(ReadjustmentKind::Tr.is_index_linked());
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&ReadjustmentKind::Selic).unwrap();
        assert_eq!(json, "\"selic\"");
        let p: Periodicity = serde_json::from_str("\"mensal\"").unwrap();
        assert_eq!(p, Periodicity::Monthly);
    }
}
