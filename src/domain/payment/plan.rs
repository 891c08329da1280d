//! Premium plan catalog.
//!
//! This is the only price table in the system. Order creation, webhook
//! reconciliation and the client all resolve plans through it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency every plan is priced in.
pub const DEFAULT_CURRENCY: &str = "INR";

/// A purchasable premium plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    #[serde(rename = "plan6")]
    HalfYear,
    #[serde(rename = "plan12")]
    Year,
    #[serde(rename = "plan15")]
    FifteenMonths,
}

impl Plan {
    /// All plans, cheapest first.
    pub const ALL: [Plan; 3] = [Plan::HalfYear, Plan::Year, Plan::FifteenMonths];

    /// Wire identifier used by the client (`plan6`, `plan12`, `plan15`).
    pub fn id(&self) -> &'static str {
        match self {
            Plan::HalfYear => "plan6",
            Plan::Year => "plan12",
            Plan::FifteenMonths => "plan15",
        }
    }

    /// Price in whole rupees.
    pub fn price_major(&self) -> i64 {
        match self {
            Plan::HalfYear => 5,
            Plan::Year => 10,
            Plan::FifteenMonths => 15,
        }
    }

    /// Price in paise, the unit the gateway works in.
    pub fn price_minor(&self) -> i64 {
        self.price_major() * 100
    }

    /// Length of the premium period in calendar months.
    pub fn months(&self) -> u32 {
        match self {
            Plan::HalfYear => 6,
            Plan::Year => 12,
            Plan::FifteenMonths => 15,
        }
    }

    /// Looks up a plan by its wire identifier.
    pub fn from_id(id: &str) -> Option<Plan> {
        Self::ALL.into_iter().find(|p| p.id() == id.trim())
    }

    /// Looks up a plan by its price in rupees.
    pub fn from_price_major(rupees: i64) -> Option<Plan> {
        Self::ALL.into_iter().find(|p| p.price_major() == rupees)
    }

    /// Looks up a plan by its price in paise.
    pub fn from_price_minor(paise: i64) -> Option<Plan> {
        Self::ALL.into_iter().find(|p| p.price_minor() == paise)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::from_id(s).ok_or_else(|| format!("unknown plan: {}", s))
    }
}

/// Premium duration bought by a payment of `rupees`.
///
/// Returns `None` for amounts that do not match a plan price.
pub fn months_for_amount(rupees: i64) -> Option<u32> {
    Plan::from_price_major(rupees).map(|p| p.months())
}
