// 数据库模块
// 实体定义、存储库接口及其 PostgreSQL / 内存实现

pub mod memory;
pub mod models;
pub mod repositories;

pub use memory::MemoryStore;
pub use models::{NewSession, NewUser, SessionEntity, TeacherEntity, UserEntity};
pub use repositories::{
    PgSessionRepository, PgTeacherRepository, PgUserRepository, SessionRepository,
    TeacherRepository, UserRepository,
};
