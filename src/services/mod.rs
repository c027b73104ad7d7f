pub mod auth;
pub mod session;
pub mod teacher;
pub mod user;

pub use auth::AuthService;
pub use session::SessionService;
pub use teacher::TeacherService;
pub use user::UserService;
