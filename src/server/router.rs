use crate::db::DbActorHandle;
use crate::error::CampError;
use crate::server::routes::{activities, campers, signups};

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Uri, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use base64::Engine as _;
use rand::RngCore;
use std::time::Instant;
use tracing::Level;

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Router state. Handlers reach storage only through this handle.
#[derive(Clone)]
pub struct CampState {
    pub db: DbActorHandle,
}

impl CampState {
    pub fn new(db: DbActorHandle) -> Self {
        Self { db }
    }
}

async fn home_handler() -> &'static str {
    ""
}

async fn not_found_handler(uri: Uri) -> CampError {
    CampError::NoRoute {
        path: uri.path().to_string(),
    }
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    macro_rules! served {
        ($level:expr) => {
            tracing::event!(
                $level,
                status = status.as_u16(),
                %request_id,
                %method,
                ?version,
                path = uri.path(),
                latency_ms,
                %user_agent,
                "request served"
            )
        };
    }
    if status.is_server_error() {
        served!(Level::ERROR);
    } else if status.is_client_error() {
        served!(Level::WARN);
    } else {
        served!(Level::INFO);
    }

    resp
}

pub fn camp_router(state: CampState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .merge(campers::router())
        .merge(activities::router())
        .merge(signups::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
