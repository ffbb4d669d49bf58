use payloads::{StudentFilter, requests};
use reqwest::StatusCode;
use test_helpers::{assert_status_code, spawn_app, students_page};

#[tokio::test]
async fn requests_without_a_session_are_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .list_students(&students_page(StudentFilter::default(), 0, 10))
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn login_attaches_token_to_later_requests() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let display_name = app.client.login(&test_helpers::staff_credentials()).await?;
    assert_eq!(display_name, "Directora Loa");
    assert!(app.client.session.is_authenticated());

    let students = app
        .client
        .list_students(&students_page(StudentFilter::default(), 0, 10))
        .await?;
    assert_eq!(students.len(), 10);

    // a client with its own empty session is still locked out
    let other = app.new_client();
    let result = other
        .list_students(&students_page(StudentFilter::default(), 0, 10))
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn wrong_password_leaves_session_empty() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .login(&requests::LoginCredentials {
            username: "directora".into(),
            password: "nope".into(),
        })
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);
    assert!(!app.client.session.is_authenticated());

    Ok(())
}

#[tokio::test]
async fn logout_ends_the_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;
    let token = app
        .client
        .session
        .with_exposed_token(str::to_string)
        .unwrap();

    app.client.logout().await?;
    assert!(!app.client.session.is_authenticated());
    assert!(!app.backend.state().sessions.contains(&token));

    Ok(())
}

#[tokio::test]
async fn rejected_session_is_cleared_locally() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    app.backend.state().sessions.clear();
    let result = app
        .client
        .list_students(&students_page(StudentFilter::default(), 0, 10))
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);
    assert!(!app.client.session.is_authenticated());

    Ok(())
}
