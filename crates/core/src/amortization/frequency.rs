//! Payment frequency of a loan.

use serde::{Deserialize, Serialize};

/// How often an installment falls due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    /// Twelve payments per year.
    #[default]
    Monthly,
    /// Four payments per year.
    Quarterly,
    /// Two payments per year.
    SemiAnnually,
    /// One payment per year.
    Annually,
}

impl PaymentFrequency {
    /// All frequencies, most frequent first.
    pub const ALL: [Self; 4] = [
        Self::Monthly,
        Self::Quarterly,
        Self::SemiAnnually,
        Self::Annually,
    ];

    /// Number of payment periods in one year.
    #[must_use]
    pub const fn periods_per_year(self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::SemiAnnually => 2,
            Self::Annually => 1,
        }
    }

    /// Calendar months covered by one payment period.
    #[must_use]
    pub const fn months_per_period(self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Wire name, as accepted by `FromStr`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnually => "semi-annually",
            Self::Annually => "annually",
        }
    }
}

impl std::fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "semi-annually" => Ok(Self::SemiAnnually),
            "annually" => Ok(Self::Annually),
            _ => Err(format!("Unknown payment frequency: {s}")),
        }
    }
}
