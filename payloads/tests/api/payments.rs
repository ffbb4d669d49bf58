use jiff::civil::date;
use payloads::{PaymentFilter, PaymentMethod, StudentId, requests};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{assert_status_code, spawn_app};

fn first_week() -> PaymentFilter {
    PaymentFilter {
        from: date(2025, 3, 1),
        to: date(2025, 3, 7),
        student_id: None,
    }
}

fn new_payment(student_id: i64) -> requests::CreatePayment {
    requests::CreatePayment {
        student_id: StudentId(student_id),
        amount: dec!(1800.00),
        method: PaymentMethod::Card,
        paid_on: date(2025, 3, 14),
        note: Some("Matrícula".into()),
    }
}

#[tokio::test]
async fn payments_are_listed_newest_first() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let page = app
        .client
        .list_payments(&requests::ListPayments {
            filter: first_week(),
            page: 0,
            page_size: 5,
        })
        .await?;
    let rest = app
        .client
        .list_payments(&requests::ListPayments {
            filter: first_week(),
            page: 1,
            page_size: 5,
        })
        .await?;

    let days: Vec<i8> = page.iter().map(|p| p.paid_on.day()).collect();
    assert_eq!(days, vec![7, 6, 5, 4, 3]);
    let days: Vec<i8> = rest.iter().map(|p| p.paid_on.day()).collect();
    assert_eq!(days, vec![2, 1]);

    Ok(())
}

#[tokio::test]
async fn created_payment_shows_up_in_listing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let created = app.client.create_payment(&new_payment(5)).await?;
    assert_eq!(created.amount, dec!(1800.00));
    assert_eq!(created.student_name, "Elena Paz");

    let listed = app
        .client
        .list_payments(&requests::ListPayments {
            filter: PaymentFilter {
                from: date(2025, 3, 14),
                to: date(2025, 3, 14),
                student_id: Some(StudentId(5)),
            },
            page: 0,
            page_size: 10,
        })
        .await?;
    assert_eq!(listed, vec![created]);

    Ok(())
}

#[tokio::test]
async fn invalid_payment_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let mut payment = new_payment(5);
    payment.amount = dec!(0);
    let result = app.client.create_payment(&payment).await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    let result = app.client.create_payment(&new_payment(999)).await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}
