//! Fixture data for the mock backend
//!
//! The same dataset backs the dev-server and the client integration tests:
//! - three groups of students, a few of them inactive
//! - a month of payments spread across the three payment methods
//! - one staff login

use jiff::civil::{Date, date};
use payloads::{
    GroupId, Payment, PaymentId, PaymentMethod, Student, StudentId,
};
use rust_decimal::Decimal;

use crate::server::StaffAccount;

pub const STAFF_USERNAME: &str = "directora";
pub const STAFF_PASSWORD: &str = "password123";

const GROUPS: [(i64, &str); 3] =
    [(1, "Inicial"), (2, "Intermedio"), (3, "Avanzado")];

const FIRST_NAMES: [&str; 9] = [
    "Ana", "Bruno", "Camila", "Diego", "Elena", "Facundo", "Julieta", "Lucas",
    "Martina",
];

const LAST_NAMES: [&str; 5] = ["Paz", "Rey", "Sosa", "Vera", "Luna"];

pub struct MockDataset {
    pub today: Date,
    pub staff: Vec<StaffAccount>,
    pub students: Vec<Student>,
    pub payments: Vec<Payment>,
}

impl MockDataset {
    /// 45 students (15 per group, every seventh one inactive) and 31 payments
    /// in March 2025.
    pub fn standard() -> Self {
        Self::with_students(45)
    }

    pub fn with_students(count: usize) -> Self {
        let students = (0..count).map(student).collect::<Vec<_>>();
        let payments = if students.is_empty() {
            Vec::new()
        } else {
            (0..31).map(|i| payment(i, &students)).collect()
        };

        Self {
            today: date(2025, 3, 14),
            staff: vec![StaffAccount {
                username: STAFF_USERNAME.into(),
                password: STAFF_PASSWORD.into(),
                display_name: "Directora Loa".into(),
            }],
            students,
            payments,
        }
    }

    pub fn print_summary(&self) {
        let inactive = self.students.iter().filter(|s| !s.is_active).count();
        let total: Decimal = self.payments.iter().map(|p| p.amount).sum();
        tracing::info!("📋 Dataset summary");
        tracing::info!(
            "   Students: {} ({} inactive) in {} groups",
            self.students.len(),
            inactive,
            GROUPS.len()
        );
        tracing::info!(
            "   Payments: {} totalling {}",
            self.payments.len(),
            total
        );
        tracing::info!("   Today is {}", self.today);
        tracing::info!("   Login: {STAFF_USERNAME} / {STAFF_PASSWORD}");
    }
}

fn student(index: usize) -> Student {
    let (group_id, group_name) = GROUPS[index % GROUPS.len()];
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];
    Student {
        id: StudentId(index as i64 + 1),
        full_name: format!("{first} {last}"),
        group_id: GroupId(group_id),
        group_name: group_name.to_string(),
        is_active: index % 7 != 6,
        present_today: false,
    }
}

fn payment(index: usize, students: &[Student]) -> Payment {
    let student = &students[(index * 4) % students.len()];
    let method = match index % 3 {
        0 => PaymentMethod::Cash,
        1 => PaymentMethod::Transfer,
        _ => PaymentMethod::Card,
    };
    Payment {
        id: PaymentId(index as i64 + 1),
        student_id: student.id,
        student_name: student.full_name.clone(),
        // 1200.00, 1350.00 or 1500.00
        amount: Decimal::new(120_000 + 15_000 * (index as i64 % 3), 2),
        method,
        paid_on: date(2025, 3, (index % 31) as i8 + 1),
        note: (index % 5 == 0).then(|| "Cuota mensual".to_string()),
    }
}
