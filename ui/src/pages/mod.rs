pub mod income;
pub mod login;
pub mod not_found;
pub mod students;

pub use income::IncomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use students::StudentsPage;
