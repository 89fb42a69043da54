use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tracing::{error, info, warn};

use chaohua_domain::credential::MSG_INVALID_INDEX;
use chaohua_domain::shared::DomainError;
use chaohua_infrastructure::logging::get_log_dir;

use super::dto::{AddCookieForm, ApiResponse, CookieView, DeleteCookieForm, HealthResponse};
use super::server::AppState;

pub const MSG_COOKIE_ADDED: &str = "Cookie添加成功！";
pub const MSG_COOKIE_DELETED: &str = "Cookie删除成功！";
pub const MSG_RUN_FINISHED: &str = "签到任务执行完成！";

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/cookies", get(list_cookies))
        .route("/add_cookie", post(add_cookie))
        .route("/delete_cookie", post(delete_cookie))
        .route("/run_sign", post(run_sign))
        .route("/health", get(health))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// User-facing text for a failed request
fn failure_message(err: &DomainError) -> String {
    match err {
        DomainError::Validation(msg)
        | DomainError::AlreadyExists(msg)
        | DomainError::NotFound(msg)
        | DomainError::AlreadyRunning(msg) => msg.clone(),
        other => format!("执行失败：{}", other.message()),
    }
}

async fn list_cookies(State(state): State<AppState>) -> Json<ApiResponse> {
    match state.service.list_cookies().await {
        Ok(cookies) => Json(
            ApiResponse::success("").with_cookies(cookies.into_iter().map(CookieView::from).collect()),
        ),
        Err(e) => {
            error!("Failed to list cookies: {}", e.format_with_code());
            Json(ApiResponse::error(failure_message(&e)))
        }
    }
}

async fn add_cookie(
    State(state): State<AppState>,
    Form(form): Form<AddCookieForm>,
) -> Json<ApiResponse> {
    match state.service.add_cookie(&form.cookie).await {
        Ok(()) => Json(ApiResponse::success(MSG_COOKIE_ADDED)),
        Err(e) => {
            warn!("Add cookie rejected: {}", e.format_with_code());
            Json(ApiResponse::error(failure_message(&e)))
        }
    }
}

async fn delete_cookie(
    State(state): State<AppState>,
    Form(form): Form<DeleteCookieForm>,
) -> Json<ApiResponse> {
    let index = match form.index.trim().parse::<usize>() {
        Ok(index) if index >= 1 => index,
        _ => return Json(ApiResponse::error(MSG_INVALID_INDEX)),
    };

    match state.service.delete_cookie(index).await {
        Ok(()) => Json(ApiResponse::success(MSG_COOKIE_DELETED)),
        Err(e) => {
            warn!("Delete cookie rejected: {}", e.format_with_code());
            Json(ApiResponse::error(failure_message(&e)))
        }
    }
}

async fn run_sign(State(state): State<AppState>) -> Json<ApiResponse> {
    match state.service.run_all().await {
        Ok(results) => {
            info!("Manual check-in finished for {} account(s)", results.len());
            Json(ApiResponse::success(MSG_RUN_FINISHED).with_results(results))
        }
        Err(e) => {
            if e.is_recoverable() {
                warn!("Manual check-in not started: {}", e.format_with_code());
            } else {
                error!("Manual check-in failed: {}", e.format_with_code());
            }
            Json(ApiResponse::error(failure_message(&e)))
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        running: state.service.is_running(),
        log_dir: get_log_dir().map(|dir| dir.display().to_string()),
    })
}
