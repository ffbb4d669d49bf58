use jiff::civil::date;
use pagination::PaginatedLoader;
use payloads::{GroupId, StudentFilter, StudentId, requests};
use reqwest::StatusCode;
use test_helpers::mock::MockDataset;
use test_helpers::{
    assert_status_code, spawn_app, spawn_app_with, students_page,
};

#[tokio::test]
async fn students_are_served_in_pages() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let first = app
        .client
        .list_students(&students_page(StudentFilter::default(), 0, 20))
        .await?;
    let last = app
        .client
        .list_students(&students_page(StudentFilter::default(), 2, 20))
        .await?;
    let past_the_end = app
        .client
        .list_students(&students_page(StudentFilter::default(), 3, 20))
        .await?;

    assert_eq!(first.len(), 20);
    assert_eq!(first[0].id, StudentId(1));
    assert_eq!(last.len(), 5);
    assert_eq!(last[4].id, StudentId(45));
    assert!(past_the_end.is_empty());

    Ok(())
}

#[tokio::test]
async fn oversized_page_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let result = app
        .client
        .list_students(&students_page(
            StudentFilter::default(),
            0,
            requests::MAX_PAGE_SIZE + 1,
        ))
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn students_are_filtered_before_paging() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let filter = StudentFilter {
        group_id: Some(GroupId(2)),
        search: None,
        active_only: true,
    };
    let students = app
        .client
        .list_students(&students_page(filter, 0, 100))
        .await?;

    assert!(!students.is_empty());
    assert!(students.iter().all(|s| s.group_id == GroupId(2) && s.is_active));
    // 15 students in the group, of which indices 13 and 34 are inactive
    assert_eq!(students.len(), 13);

    Ok(())
}

#[tokio::test]
async fn invalid_page_size_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let result = app
        .client
        .list_students(&students_page(StudentFilter::default(), 0, 0))
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn marking_attendance_updates_todays_flag() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;
    let today = app.backend.state().today;

    let entry = app
        .client
        .mark_attendance(&requests::MarkAttendance {
            student_id: StudentId(3),
            date: today,
            present: true,
        })
        .await?;
    assert!(entry.present);

    let students = app
        .client
        .list_students(&students_page(StudentFilter::default(), 0, 5))
        .await?;
    assert!(students[2].present_today);
    assert!(!students[1].present_today);

    // a past date is recorded without touching today's flag
    app.client
        .mark_attendance(&requests::MarkAttendance {
            student_id: StudentId(2),
            date: date(2025, 3, 1),
            present: true,
        })
        .await?;
    let state = app.backend.state();
    assert_eq!(
        state.attendance.get(&(StudentId(2), date(2025, 3, 1))),
        Some(&true)
    );
    assert!(!state.students[1].present_today);

    Ok(())
}

#[tokio::test]
async fn marking_unknown_student_is_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let result = app
        .client
        .mark_attendance(&requests::MarkAttendance {
            student_id: StudentId(999),
            date: date(2025, 3, 14),
            present: true,
        })
        .await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn loader_walks_every_page_then_stops() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let client = &app.client;
    let loader = PaginatedLoader::new(move |filter: StudentFilter, page: u32| {
        async move {
            client
                .list_students(&students_page(filter, page, 20))
                .await
                .map_err(|e| e.to_string())
        }
    });

    loader.configure(StudentFilter::default()).await;
    assert_eq!(loader.with_state(|s| s.items.len()), 20);

    loader.load_more().await;
    loader.load_more().await;
    assert_eq!(loader.with_state(|s| s.items.len()), 45);
    assert!(loader.with_state(|s| s.has_more));

    loader.load_more().await;
    let state = loader.snapshot();
    assert!(!state.has_more);
    assert_eq!(state.current_page, 2);
    let ids: Vec<i64> = state.items.iter().map(|s| s.id.0).collect();
    assert_eq!(ids, (1..=45).collect::<Vec<_>>());
    assert_eq!(app.backend.state().student_list_requests, 4);

    loader.load_more().await;
    assert_eq!(app.backend.state().student_list_requests, 4);

    // changing the filter starts over at page 0
    let group = StudentFilter {
        group_id: Some(GroupId(3)),
        ..StudentFilter::default()
    };
    assert!(loader.configure(group).await);
    let state = loader.snapshot();
    assert_eq!(state.items.len(), 15);
    assert!(state.items.iter().all(|s| s.group_id == GroupId(3)));
    assert_eq!(state.current_page, 0);

    Ok(())
}

#[tokio::test]
async fn loader_surfaces_backend_errors() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_staff().await?;

    let client = &app.client;
    let loader = PaginatedLoader::new(move |filter: StudentFilter, page: u32| {
        async move {
            client
                .list_students(&students_page(filter, page, 20))
                .await
                .map_err(|e| e.to_string())
        }
    });
    loader.configure(StudentFilter::default()).await;

    // the backend forgets the session between pages
    app.backend.state().sessions.clear();
    loader.load_more().await;

    let state = loader.snapshot();
    assert_eq!(state.items.len(), 20);
    assert_eq!(state.last_error.as_deref(), Some("Authentication failed"));
    assert!(!state.is_loading_more);

    Ok(())
}

#[tokio::test]
async fn optimistic_attendance_skips_refetch() -> anyhow::Result<()> {
    let app = spawn_app_with(MockDataset::with_students(8)).await;
    app.login_staff().await?;
    let today = app.backend.state().today;

    let client = &app.client;
    let loader = PaginatedLoader::new(move |filter: StudentFilter, page: u32| {
        async move {
            client
                .list_students(&students_page(filter, page, 5))
                .await
                .map_err(|e| e.to_string())
        }
    });
    loader.configure(StudentFilter::default()).await;

    let marked = app
        .client
        .mark_attendance(&requests::MarkAttendance {
            student_id: StudentId(4),
            date: today,
            present: true,
        })
        .await?;
    loader.set_items(|mut students| {
        for student in &mut students {
            if student.id == marked.student_id {
                student.present_today = marked.present;
            }
        }
        students
    });

    let state = loader.snapshot();
    assert!(state.items[3].present_today);
    assert_eq!(state.current_page, 0);
    assert!(state.has_more);
    assert_eq!(app.backend.state().student_list_requests, 1);

    Ok(())
}
