pub mod layout;
pub mod load_more_controls;
pub mod login_form;
pub mod require_auth;
pub mod student_row;

pub use load_more_controls::LoadMoreControls;
pub use login_form::LoginForm;
pub use require_auth::RequireAuth;
pub use student_row::StudentRow;
