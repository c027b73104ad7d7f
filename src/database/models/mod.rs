pub mod session;
pub mod teacher;
pub mod user;

pub use session::{NewSession, SessionEntity};
pub use teacher::TeacherEntity;
pub use user::{NewUser, UserEntity};
