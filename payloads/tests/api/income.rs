use jiff::civil::date;
use payloads::{PaymentMethod, requests};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{assert_status_code, spawn_app};

#[tokio::test]
async fn daily_income_groups_by_method() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let income = app
        .client
        .daily_income(&requests::DailyIncomeQuery {
            date: date(2025, 3, 14),
        })
        .await?;
    assert_eq!(income.total, dec!(1350.00));
    assert_eq!(income.payment_count, 1);
    assert_eq!(income.by_method.len(), 1);
    assert_eq!(income.by_method[0].method, PaymentMethod::Transfer);

    let quiet_day = app
        .client
        .daily_income(&requests::DailyIncomeQuery {
            date: date(2025, 4, 1),
        })
        .await?;
    assert_eq!(quiet_day.total, dec!(0));
    assert!(quiet_day.by_method.is_empty());

    Ok(())
}

#[tokio::test]
async fn monthly_income_sums_every_day() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let income = app
        .client
        .monthly_income(&requests::MonthlyIncomeQuery {
            year: 2025,
            month: 3,
        })
        .await?;
    assert_eq!(income.days.len(), 31);
    assert_eq!(income.days[0].total, dec!(1200.00));
    assert_eq!(income.total, dec!(41700.00));

    let result = app
        .client
        .monthly_income(&requests::MonthlyIncomeQuery {
            year: 2025,
            month: 13,
        })
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}
