use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

pub use state::AppState;

/// Build the full HTTP application around an already-constructed state.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(public_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{accounts, drawers};

    Router::new()
        .route("/api/register", post(accounts::register))
        .route("/api/login", post(accounts::login))
        .route("/api/drawers", post(drawers::create))
        .route("/api/drawers/login", post(drawers::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{notes, whoami};

    Router::new()
        .route("/api/auth/whoami", get(whoami))
        .route("/api/notes", get(notes::list).post(notes::create))
        .route(
            "/api/notes/:id",
            get(notes::show).put(notes::update).delete(notes::delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::jwt_auth_middleware,
        ))
}

/// Development allows any origin; production only the configured list.
fn cors_layer(config: &config::AppConfig) -> CorsLayer {
    if !config.is_production() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
