use std::sync::Arc;

use config::Config;
use database::{
    MemoryStore, PgSessionRepository, PgTeacherRepository, PgUserRepository, SessionRepository,
    TeacherRepository, UserRepository,
};
use services::{AuthService, SessionService, TeacherService, UserService};
use sqlx::PgPool;
use utils::JwtUtils;

pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod result;
pub mod router;
pub mod routes;
pub mod services;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub jwt: Arc<JwtUtils>,
    pub users: Arc<dyn UserRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        Self {
            jwt: Arc::new(JwtUtils::from_config(&config)),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            teachers: Arc::new(PgTeacherRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool)),
            config,
        }
    }

    pub fn in_memory(store: Arc<MemoryStore>, config: Config) -> Self {
        Self {
            jwt: Arc::new(JwtUtils::from_config(&config)),
            users: store.clone(),
            teachers: store.clone(),
            sessions: store,
            config,
        }
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.users.clone(), self.jwt.clone())
    }

    pub fn session_service(&self) -> SessionService {
        SessionService::new(
            self.sessions.clone(),
            self.users.clone(),
            self.teachers.clone(),
        )
    }

    pub fn teacher_service(&self) -> TeacherService {
        TeacherService::new(self.teachers.clone())
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.users.clone())
    }
}
