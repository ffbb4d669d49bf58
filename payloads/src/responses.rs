use crate::PaymentMethod;
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Returned by a successful login. The token is attached to every later
/// request by the client's session.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub total: Decimal,
}

/// Income collected on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyIncome {
    pub date: Date,
    pub total: Decimal,
    pub payment_count: u32,
    pub by_method: Vec<MethodTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: Date,
    pub total: Decimal,
}

/// Income collected over a calendar month, with a per-day breakdown of the
/// days that had payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub year: i16,
    pub month: i8,
    pub total: Decimal,
    pub days: Vec<DayTotal>,
}
