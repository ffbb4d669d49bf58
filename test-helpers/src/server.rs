//! An in-memory stand-in for the school backend.
//!
//! It speaks the same JSON-over-POST shape as [`payloads::APIClient`] and
//! serves students and payments from a [`MockDataset`] in fixed-size pages.

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer, ResponseError, get, post, web,
};
use jiff::civil::Date;
use payloads::requests::{self, MAX_PAGE_SIZE};
use payloads::{
    AttendanceEntry, Payment, PaymentId, PaymentMethod, Student, StudentId,
    responses,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::TcpListener;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::mock::MockDataset;

pub struct MockConfig {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
}

/// Login accepted by the mock backend.
pub struct StaffAccount {
    pub username: String,
    pub password: String,
    pub display_name: String,
}

pub struct BackendState {
    pub today: Date,
    pub staff: Vec<StaffAccount>,
    pub students: Vec<Student>,
    pub payments: Vec<Payment>,
    pub attendance: HashMap<(StudentId, Date), bool>,
    pub sessions: HashSet<String>,
    /// Number of `list_students` requests served, for tests that count
    /// round trips.
    pub student_list_requests: usize,
}

/// Shared handle to the backend's state, also handed to tests.
#[derive(Clone)]
pub struct MockBackend(Arc<Mutex<BackendState>>);

impl MockBackend {
    pub fn new(dataset: MockDataset) -> Self {
        Self(Arc::new(Mutex::new(BackendState {
            today: dataset.today,
            staff: dataset.staff,
            students: dataset.students,
            payments: dataset.payments,
            attendance: HashMap::new(),
            sessions: HashSet::new(),
            student_list_requests: 0,
        })))
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Authentication failed")]
    AuthError,
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl ResponseError for MockError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthError => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(
    config: &mut MockConfig,
    backend: MockBackend,
) -> std::io::Result<Server> {
    let backend = web::Data::new(backend);

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .service(
                web::scope("/api")
                    .service(health_check)
                    .service(login)
                    .service(logout)
                    .service(list_students)
                    .service(list_payments)
                    .service(mark_attendance)
                    .service(create_payment)
                    .service(daily_income)
                    .service(monthly_income),
            )
            .app_data(backend.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn require_session(
    req: &HttpRequest,
    state: &BackendState,
) -> Result<(), MockError> {
    match bearer_token(req) {
        Some(token) if state.sessions.contains(token) => Ok(()),
        _ => Err(MockError::AuthError),
    }
}

fn page_bounds(page: u32, page_size: u32) -> Result<(usize, usize), MockError> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(MockError::BadRequest(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    let start = page as usize * page_size as usize;
    Ok((start, page_size as usize))
}

#[get("/health_check")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("healthy")
}

#[tracing::instrument(skip_all, fields(username = %details.username))]
#[post("/login")]
async fn login(
    details: web::Json<requests::LoginCredentials>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, MockError> {
    let mut state = backend.state();
    let display_name = state
        .staff
        .iter()
        .find(|staff| {
            staff.username == details.username
                && staff.password == details.password
        })
        .map(|staff| staff.display_name.clone())
        .ok_or(MockError::AuthError)?;

    let token = uuid::Uuid::new_v4().to_string();
    state.sessions.insert(token.clone());
    Ok(HttpResponse::Ok().json(responses::SessionToken {
        token,
        display_name,
    }))
}

#[tracing::instrument(skip_all)]
#[post("/logout")]
async fn logout(
    req: HttpRequest,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, MockError> {
    let mut state = backend.state();
    require_session(&req, &state)?;
    if let Some(token) = bearer_token(&req) {
        state.sessions.remove(token);
    }
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(req, backend), ret)]
#[post("/list_students")]
async fn list_students(
    req: HttpRequest,
    details: web::Json<requests::ListStudents>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, MockError> {
    let mut state = backend.state();
    require_session(&req, &state)?;
    state.student_list_requests += 1;

    let (skip, take) = page_bounds(details.page, details.page_size)?;
    let page: Vec<Student> = state
        .students
        .iter()
        .filter(|student| details.filter.matches(student))
        .skip(skip)
        .take(take)
        .cloned()
        .collect();
    Ok(HttpResponse::Ok().json(page))
}

#[tracing::instrument(skip(req, backend), ret)]
#[post("/list_payments")]
async fn list_payments(
    req: HttpRequest,
    details: web::Json<requests::ListPayments>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, MockError> {
    let state = backend.state();
    require_session(&req, &state)?;

    let (skip, take) = page_bounds(details.page, details.page_size)?;
    let mut payments: Vec<&Payment> = state
        .payments
        .iter()
        .filter(|payment| details.filter.matches(payment))
        .collect();
    // newest first, stable for payments on the same day
    payments.sort_by(|a, b| {
        b.paid_on.cmp(&a.paid_on).then(b.id.0.cmp(&a.id.0))
    });
    let page: Vec<Payment> =
        payments.into_iter().skip(skip).take(take).cloned().collect();
    Ok(HttpResponse::Ok().json(page))
}

#[tracing::instrument(skip(req, backend), ret)]
#[post("/mark_attendance")]
async fn mark_attendance(
    req: HttpRequest,
    details: web::Json<requests::MarkAttendance>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, MockError> {
    let mut state = backend.state();
    require_session(&req, &state)?;

    let today = state.today;
    let student = state
        .students
        .iter_mut()
        .find(|student| student.id == details.student_id)
        .ok_or(MockError::NotFound("Student"))?;
    if details.date == today {
        student.present_today = details.present;
    }
    state
        .attendance
        .insert((details.student_id, details.date), details.present);

    Ok(HttpResponse::Ok().json(AttendanceEntry {
        student_id: details.student_id,
        date: details.date,
        present: details.present,
    }))
}

#[tracing::instrument(skip(req, backend), ret)]
#[post("/create_payment")]
async fn create_payment(
    req: HttpRequest,
    details: web::Json<requests::CreatePayment>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, MockError> {
    let mut state = backend.state();
    require_session(&req, &state)?;

    if let Some(message) = requests::validate_payment(&details).error_message()
    {
        return Err(MockError::BadRequest(message.to_string()));
    }
    let student_name = state
        .students
        .iter()
        .find(|student| student.id == details.student_id)
        .map(|student| student.full_name.clone())
        .ok_or(MockError::NotFound("Student"))?;

    let next_id = state.payments.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
    let details = details.into_inner();
    let payment = Payment {
        id: PaymentId(next_id),
        student_id: details.student_id,
        student_name,
        amount: details.amount,
        method: details.method,
        paid_on: details.paid_on,
        note: details.note,
    };
    state.payments.push(payment.clone());
    Ok(HttpResponse::Ok().json(payment))
}

#[tracing::instrument(skip(req, backend), ret)]
#[post("/daily_income")]
async fn daily_income(
    req: HttpRequest,
    details: web::Json<requests::DailyIncomeQuery>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, MockError> {
    let state = backend.state();
    require_session(&req, &state)?;

    let day: Vec<&Payment> = state
        .payments
        .iter()
        .filter(|payment| payment.paid_on == details.date)
        .collect();
    let by_method = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Card,
    ]
    .into_iter()
    .filter_map(|method| {
        let total: Decimal = day
            .iter()
            .filter(|payment| payment.method == method)
            .map(|payment| payment.amount)
            .sum();
        (total != Decimal::ZERO)
            .then_some(responses::MethodTotal { method, total })
    })
    .collect();

    Ok(HttpResponse::Ok().json(responses::DailyIncome {
        date: details.date,
        total: day.iter().map(|payment| payment.amount).sum(),
        payment_count: day.len() as u32,
        by_method,
    }))
}

#[tracing::instrument(skip(req, backend), ret)]
#[post("/monthly_income")]
async fn monthly_income(
    req: HttpRequest,
    details: web::Json<requests::MonthlyIncomeQuery>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, MockError> {
    let state = backend.state();
    require_session(&req, &state)?;

    if !(1..=12).contains(&details.month) {
        return Err(MockError::BadRequest("month must be 1-12".into()));
    }
    let mut days: BTreeMap<Date, Decimal> = BTreeMap::new();
    for payment in state.payments.iter().filter(|payment| {
        payment.paid_on.year() == details.year
            && payment.paid_on.month() == details.month
    }) {
        *days.entry(payment.paid_on).or_default() += payment.amount;
    }

    Ok(HttpResponse::Ok().json(responses::MonthlyIncome {
        year: details.year,
        month: details.month,
        total: days.values().copied().sum(),
        days: days
            .into_iter()
            .map(|(date, total)| responses::DayTotal { date, total })
            .collect(),
    }))
}
