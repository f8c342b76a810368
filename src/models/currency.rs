//! Currency codes accepted by the ledger

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Fixed set of supported currency codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
    Rub,
    Eur,
    Cny,
    Lkr,
}

impl Currency {
    /// All supported currencies in menu order
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Inr,
        Currency::Rub,
        Currency::Eur,
        Currency::Cny,
        Currency::Lkr,
    ];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Inr => "INR",
            Self::Rub => "RUB",
            Self::Eur => "EUR",
            Self::Cny => "CNY",
            Self::Lkr => "LKR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Unsupported currency '{}'. Expected one of: USD, INR, RUB, EUR, CNY, LKR",
                    s
                ))
            })
    }
}
