pub mod mock;
pub mod server;
pub mod telemetry;

use mock::{MockDataset, STAFF_PASSWORD, STAFF_USERNAME};
use payloads::{Session, StudentFilter, requests};
use reqwest::StatusCode;
use server::{MockBackend, MockConfig};
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub client: payloads::APIClient,
    pub backend: MockBackend,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// A second client against the same backend with its own session.
    pub fn new_client(&self) -> payloads::APIClient {
        payloads::APIClient::new(self.address(), Session::default())
    }

    pub async fn login_staff(&self) -> anyhow::Result<()> {
        self.client.login(&staff_credentials()).await?;
        Ok(())
    }
}

pub fn staff_credentials() -> requests::LoginCredentials {
    requests::LoginCredentials {
        username: STAFF_USERNAME.into(),
        password: STAFF_PASSWORD.into(),
    }
}

pub fn students_page(
    filter: StudentFilter,
    page: u32,
    page_size: u32,
) -> requests::ListStudents {
    requests::ListStudents {
        filter,
        page,
        page_size,
    }
}

pub async fn spawn_app_on_port(port: u16, dataset: MockDataset) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let mut config = MockConfig {
        ip: "127.0.0.1".into(),
        port,
    };
    let backend = MockBackend::new(dataset);
    let server = server::build(&mut config, backend.clone()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: payloads::APIClient::new(
            format!("http://127.0.0.1:{}", config.port),
            Session::default(),
        ),
        backend,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0, MockDataset::standard()).await
}

pub async fn spawn_app_with(dataset: MockDataset) -> TestApp {
    spawn_app_on_port(0, dataset).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
