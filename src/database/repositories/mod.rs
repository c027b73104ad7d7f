pub mod session;
pub mod teacher;
pub mod user;

pub use session::{PgSessionRepository, SessionRepository};
pub use teacher::{PgTeacherRepository, TeacherRepository};
pub use user::{PgUserRepository, UserRepository};
