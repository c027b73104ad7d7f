use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors},
    routes,
};

// 公开路由：登录与注册
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/register", post(routes::auth::register))
}

// 需要认证的路由
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // 课程路由
        .route(
            "/session",
            get(routes::session::find_all).post(routes::session::create),
        )
        .route(
            "/session/{id}",
            get(routes::session::find_by_id)
                .put(routes::session::update)
                .delete(routes::session::delete),
        )
        .route(
            "/session/{id}/participate/{user_id}",
            post(routes::session::participate).delete(routes::session::no_longer_participate),
        )
        // 教师路由
        .route("/teacher", get(routes::teacher::find_all))
        .route("/teacher/{id}", get(routes::teacher::find_by_id))
        // 用户路由
        .route(
            "/user/{id}",
            get(routes::user::find_by_id).delete(routes::user::delete),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
}

/// 构建完整应用，包含日志与 CORS 层
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state));

    // 根路径不能 nest，直接合并
    let base = state.config.api_base_uri.trim_end_matches('/').to_string();
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&base, api)
    };

    let router = router
        .layer(axum::middleware::from_fn(log_errors))
        .layer(TraceLayer::new_for_http());

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
