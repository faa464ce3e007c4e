use axum::{Json, Router, http::StatusCode, routing::get};
use serde::Serialize;
use tower_http::timeout::TimeoutLayer;

use crate::{AppState, middleware::log_errors, routes};

#[derive(Serialize)]
struct Ping {
    status: &'static str,
    timestamp: i64,
}

// 健康检查
async fn ping() -> Json<Ping> {
    Json(Ping {
        status: "ok",
        timestamp: chrono::Utc::now().timestamp(),
    })
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/geo-speed", get(routes::geo_speed::get_geo_speed))
        .route("/ping", get(ping))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout(),
        ))
        .layer(axum::middleware::from_fn(log_errors));

    // 开发环境允许所有来源
    #[cfg(debug_assertions)]
    let router = router.layer(tower_http::cors::CorsLayer::permissive());

    router.with_state(state)
}
