use crate::{PaymentFilter, PaymentMethod, StudentFilter, StudentId};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const PAYMENT_NOTE_MAX_LEN: usize = 255;

#[derive(Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Request one page of students. Pages are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStudents {
    pub filter: StudentFilter,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPayments {
    pub filter: PaymentFilter,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAttendance {
    pub student_id: StudentId,
    pub date: Date,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePayment {
    pub student_id: StudentId,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub paid_on: Date,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyIncomeQuery {
    pub date: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIncomeQuery {
    pub year: i16,
    /// 1-12
    pub month: i8,
}

/// Validation result for a payment entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentValidation {
    Valid,
    AmountNotPositive,
    TooManyDecimals,
    NoteTooLong,
}

impl PaymentValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::AmountNotPositive => Some("Amount must be greater than zero"),
            Self::TooManyDecimals => {
                Some("Amount can have at most two decimal places")
            }
            Self::NoteTooLong => Some("Note must be at most 255 characters"),
        }
    }
}

/// Validate a payment before sending it.
pub fn validate_payment(payment: &CreatePayment) -> PaymentValidation {
    if payment.amount <= Decimal::ZERO {
        return PaymentValidation::AmountNotPositive;
    }
    if payment.amount.normalize().scale() > 2 {
        return PaymentValidation::TooManyDecimals;
    }
    if let Some(note) = &payment.note
        && note.chars().count() > PAYMENT_NOTE_MAX_LEN
    {
        return PaymentValidation::NoteTooLong;
    }
    PaymentValidation::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use rust_decimal::dec;

    fn payment(amount: Decimal) -> CreatePayment {
        CreatePayment {
            student_id: StudentId(1),
            amount,
            method: PaymentMethod::Transfer,
            paid_on: date(2025, 4, 2),
            note: None,
        }
    }

    #[test]
    fn payment_validation() {
        assert!(validate_payment(&payment(dec!(1200.50))).is_valid());
        assert!(validate_payment(&payment(dec!(1200.500))).is_valid());
        assert_eq!(
            validate_payment(&payment(dec!(0))),
            PaymentValidation::AmountNotPositive
        );
        assert_eq!(
            validate_payment(&payment(dec!(-5))),
            PaymentValidation::AmountNotPositive
        );
        assert_eq!(
            validate_payment(&payment(dec!(10.125))),
            PaymentValidation::TooManyDecimals
        );

        let mut long_note = payment(dec!(10));
        long_note.note = Some("x".repeat(PAYMENT_NOTE_MAX_LEN + 1));
        assert_eq!(
            validate_payment(&long_note),
            PaymentValidation::NoteTooLong
        );
    }
}
