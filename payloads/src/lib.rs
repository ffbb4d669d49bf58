pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError, Session};

use derive_more::Display;
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Id type wrappers help ensure we don't mix up ids for different records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StudentId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PaymentId(pub i64);

/// A student as listed on the students and attendance screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub full_name: String,
    pub group_id: GroupId,
    pub group_name: String,
    pub is_active: bool,
    /// Whether attendance has been taken for today.
    pub present_today: bool,
}

/// One row of an attendance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: StudentId,
    pub date: Date,
    pub present: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub student_id: StudentId,
    pub student_name: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub paid_on: Date,
    pub note: Option<String>,
}

/// Which students a list shows. Used as the dependency value of the
/// students list, so any change restarts its pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFilter {
    pub group_id: Option<GroupId>,
    /// Case-insensitive substring match on the student's name.
    pub search: Option<String>,
    pub active_only: bool,
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        if self.active_only && !student.is_active {
            return false;
        }
        if let Some(group_id) = self.group_id
            && student.group_id != group_id
        {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => student
                .full_name
                .to_lowercase()
                .contains(&search.to_lowercase()),
            _ => true,
        }
    }
}

/// Payments recorded within an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFilter {
    pub from: Date,
    pub to: Date,
    pub student_id: Option<StudentId>,
}

impl PaymentFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        payment.paid_on >= self.from
            && payment.paid_on <= self.to
            && self
                .student_id
                .is_none_or(|student_id| payment.student_id == student_id)
    }
}
