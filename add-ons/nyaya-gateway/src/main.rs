//! Axum-based API gateway for the bilingual legal-information assistant.
//! Config-driven via AppConfig; binds the knowledge query service, the chat
//! router, and the local profile store to HTTP.

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use nyaya_chat::ChatRouter;
use nyaya_core::{
    AppConfig, ChatMessage, KnowledgeParams, KnowledgeService, KnowledgeStore, Language,
    NewProfile, ProfileError, ProfileStore, ProfileUpdate,
};
use std::path::Path as StdPath;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[nyaya-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(AppConfig::load().expect("load AppConfig"));

    // The dataset is loaded once; a failed load keeps the gateway up and the
    // knowledge route reports the failure per request.
    let knowledge = match KnowledgeStore::load_path(&config.knowledge_path) {
        Ok(store) => {
            let snapshot = store.snapshot();
            tracing::info!(
                "Knowledge dataset loaded: {} categories, {} articles, {} procedures",
                snapshot.categories.len(),
                snapshot.article_count(),
                snapshot.procedures.len()
            );
            Some(Arc::new(KnowledgeService::new(store)))
        }
        Err(e) => {
            tracing::error!("Knowledge dataset unavailable: {}", e);
            None
        }
    };

    let storage = StdPath::new(&config.storage_path);
    let profiles = Arc::new(
        ProfileStore::open_path(storage.join("nyaya_profiles")).expect("open profile store"),
    );
    match profiles.seed_demo_profiles() {
        Ok(true) => tracing::info!("Demo profiles seeded"),
        Ok(false) => tracing::debug!("Profile store already populated"),
        Err(e) => tracing::warn!("Failed to seed demo profiles: {}", e),
    }

    let chat = Arc::new(ChatRouter::new());

    let app = build_app(AppState {
        config: Arc::clone(&config),
        knowledge,
        profiles,
        chat,
    });

    let port = config.port;
    let app_name = config.app_name.clone();
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("{} listening on {}", app_name, addr);
    axum::serve(
        tokio::net::TcpListener::bind(addr).await.unwrap(),
        app,
    )
    .await
    .unwrap();
}

fn frontend_root_dir() -> std::path::PathBuf {
    // Prefer a working-directory relative path for local development (run
    // from workspace root). Fall back to the workspace-root-relative path
    // from add-ons/nyaya-gateway: manifest -> .. -> .. -> frontend.
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let from_cwd = cwd.join("frontend");
    if from_cwd.exists() {
        return from_cwd;
    }

    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("frontend")
}

fn build_app(state: AppState) -> Router {
    let frontend_enabled = state.config.frontend_enabled;

    // CORS: allow Backend/API (8001-8099) and Frontend/UI (3001-3099) port ranges.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &axum::http::HeaderValue, _| {
            let s = origin.to_str().unwrap_or("");
            let port = s
                .split(':')
                .last()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(0);
            (3001..=3099).contains(&port) || (8001..=8099).contains(&port)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any);

    let mut app = Router::new()
        .route("/v1/status", get(status))
        .route("/api/v1/health", get(health))
        .route("/api/v1/knowledge", get(knowledge_search))
        .route("/api/v1/chat", post(chat))
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/profile/:user_id", get(get_profile).post(update_profile))
        .with_state(state);

    if frontend_enabled {
        let frontend_dir = frontend_root_dir();
        let index_file = frontend_dir.join("index.html");
        let assets_dir = frontend_dir.join("assets");

        // Map `/` -> `frontend/index.html`
        app = app.route_service("/", ServeFile::new(index_file));

        // Map `/assets/*` -> `frontend/assets/*` (CSS, images, etc.)
        if assets_dir.exists() {
            app = app.nest_service("/assets", ServeDir::new(assets_dir));
        }

        // Map `/ui/*` -> `frontend/*` (app.js, assets, and any other files)
        app = app.nest_service("/ui", ServeDir::new(frontend_dir));
    }

    app.layer(cors)
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<AppConfig>,
    /// None when the dataset failed to load; the knowledge route reports the
    /// failure, every other route keeps working.
    pub(crate) knowledge: Option<Arc<KnowledgeService>>,
    pub(crate) profiles: Arc<ProfileStore>,
    pub(crate) chat: Arc<ChatRouter>,
}

/// GET /api/v1/health – liveness check for UI and scripts.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /v1/status – app identity and dataset counters from config.
async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let knowledge = match &state.knowledge {
        Some(service) => {
            let snapshot = service.snapshot();
            serde_json::json!({
                "loaded": true,
                "categories": snapshot.categories.len(),
                "articles": snapshot.article_count(),
                "procedures": snapshot.procedures.len(),
            })
        }
        None => serde_json::json!({ "loaded": false }),
    };
    Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "llm_mode": state.config.llm_mode,
        "default_language": state.config.default_language.as_tag(),
        "knowledge": knowledge,
    }))
}

/// GET /api/v1/knowledge – filtered view of the legal knowledge dataset.
///
/// Query parameters: `q` (substring search), `category` (category id),
/// `lang` ("en" | "hi"). All optional; unrecognized values degrade to "no
/// filter" rather than erroring. Only a failed dataset load is an error.
async fn knowledge_search(
    State(state): State<AppState>,
    Query(params): Query<KnowledgeParams>,
) -> Response {
    match &state.knowledge {
        Some(service) => {
            let result = service.query(&params);
            tracing::info!(
                target: "nyaya::knowledge",
                categories = result.categories.len(),
                procedures = result.procedures.len(),
                "Knowledge query served"
            );
            Json(result).into_response()
        }
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Failed to fetch legal knowledge" })),
        )
            .into_response(),
    }
}

/// Chat request from the UI: the running conversation plus the display
/// language the reply should be generated in.
#[derive(serde::Deserialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    #[serde(default)]
    language: Option<Language>,
}

/// POST /api/v1/chat – forwards the conversation to the model router and
/// returns the buffered reply.
async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    let language = req.language.unwrap_or(state.config.default_language);
    tracing::info!(
        "Chat request received: {} turns, lang: {}",
        req.messages.len(),
        language.as_tag()
    );

    match state.chat.generate(&req.messages, language).await {
        Ok(content) => Json(serde_json::json!({ "content": content })).into_response(),
        Err(e) => {
            tracing::error!("Chat error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Failed to process request",
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// POST /api/v1/auth/signup – creates a profile in the local store.
async fn signup(State(state): State<AppState>, Json(input): Json<NewProfile>) -> Response {
    match state.profiles.signup(input) {
        Ok(profile) => Json(profile).into_response(),
        Err(ProfileError::EmailTaken) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "error": "email already registered" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Signup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "profile store unavailable" })),
            )
                .into_response()
        }
    }
}

#[derive(serde::Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// POST /api/v1/auth/login – plain credential match against the local store.
async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.profiles.login(&req.email, &req.password) {
        Ok(Some(profile)) => Json(profile).into_response(),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "invalid email or password" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "profile store unavailable" })),
            )
                .into_response()
        }
    }
}

/// GET /api/v1/profile/:user_id – profile record for the UI.
async fn get_profile(State(state): State<AppState>, Path(user_id): Path<String>) -> Response {
    match state.profiles.get(&user_id) {
        Ok(Some(profile)) => Json(profile).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!("Profile lookup failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /api/v1/profile/:user_id – partial update (name, preferred language).
async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(updates): Json<ProfileUpdate>,
) -> Response {
    match state.profiles.update(&user_id, &updates) {
        Ok(profile) => Json(profile).into_response(),
        Err(ProfileError::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!("Profile update failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use nyaya_chat::LlmMode;
    use tower::ServiceExt;

    const DATASET: &str = r#"{
        "categories": [
            {
                "id": "const",
                "name": "Constitutional Rights",
                "nameHindi": "संवैधानिक अधिकार",
                "description": "Fundamental rights under the Indian Constitution",
                "articles": [
                    {
                        "id": "a1",
                        "title": "Right to Equality",
                        "summary": "Article 14",
                        "keyPoints": ["equal protection"]
                    }
                ]
            }
        ],
        "procedures": [
            {
                "id": "p1",
                "title": "File an RTI request",
                "titleHindi": "RTI आवेदन दायर करें",
                "steps": ["Draft application", "Pay fee"],
                "stepsHindi": ["आवेदन का मसौदा तैयार करें", "शुल्क का भुगतान करें"]
            }
        ]
    }"#;

    fn test_config() -> AppConfig {
        AppConfig {
            app_name: "Test Gateway".to_string(),
            port: 8001,
            storage_path: "./data".to_string(),
            llm_mode: "mock".to_string(),
            knowledge_path: "config/legal_knowledge.json".to_string(),
            default_language: Language::En,
            frontend_enabled: false,
        }
    }

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let store = KnowledgeStore::from_json(DATASET).unwrap();
        AppState {
            config: Arc::new(test_config()),
            knowledge: Some(Arc::new(KnowledgeService::new(store))),
            profiles: Arc::new(ProfileStore::open_path(dir.path().join("profiles")).unwrap()),
            chat: Arc::new(ChatRouter::with_mode(LlmMode::Mock)),
        }
    }

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_status_returns_app_identity_and_dataset_counts() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));
        let res = app.oneshot(get_request("/v1/status")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["app_name"], "Test Gateway");
        assert_eq!(json["llm_mode"], "mock");
        assert_eq!(json["default_language"], "en");
        assert_eq!(json["knowledge"]["loaded"], true);
        assert_eq!(json["knowledge"]["categories"], 1);
        assert_eq!(json["knowledge"]["articles"], 1);
        assert_eq!(json["knowledge"]["procedures"], 1);
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));
        let res = app.oneshot(get_request("/api/v1/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_knowledge_without_params_returns_full_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));
        let res = app.oneshot(get_request("/api/v1/knowledge")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["categories"].as_array().unwrap().len(), 1);
        assert_eq!(json["procedures"].as_array().unwrap().len(), 1);
        assert_eq!(json["categories"][0]["articles"][0]["title"], "Right to Equality");
    }

    #[tokio::test]
    async fn test_knowledge_search_narrows_articles() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));
        let res = app
            .oneshot(get_request("/api/v1/knowledge?q=equality&lang=en"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["categories"].as_array().unwrap().len(), 1);
        assert_eq!(json["categories"][0]["articles"].as_array().unwrap().len(), 1);
        // The term matches no procedure.
        assert_eq!(json["procedures"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_knowledge_unknown_category_is_empty_success() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));
        let res = app
            .oneshot(get_request("/api/v1/knowledge?category=other"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["categories"].as_array().unwrap().len(), 0);
        // The category filter never touches procedures.
        assert_eq!(json["procedures"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_knowledge_reports_failed_dataset_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(&dir);
        state.knowledge = None;
        let app = build_app(state);
        let res = app.oneshot(get_request("/api/v1/knowledge")).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(res).await["error"], "Failed to fetch legal knowledge");
    }

    #[tokio::test]
    async fn test_chat_mock_mode_returns_content() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));
        let res = app
            .oneshot(post_json(
                "/api/v1/chat",
                serde_json::json!({
                    "messages": [{ "role": "user", "content": "What is Article 14?" }],
                    "language": "hi"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        let content = json["content"].as_str().unwrap();
        assert!(content.contains("Article 14"));
        assert!(content.contains("अस्वीकरण"));
    }

    #[tokio::test]
    async fn test_chat_without_user_turn_reports_upstream_error_shape() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));
        let res = app
            .oneshot(post_json(
                "/api/v1/chat",
                serde_json::json!({ "messages": [], "language": "en" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(res).await;
        assert_eq!(json["error"], "Failed to process request");
        assert!(json["details"].as_str().unwrap().contains("no user message"));
    }

    #[tokio::test]
    async fn test_signup_login_and_profile_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/signup",
                serde_json::json!({
                    "name": "Asha",
                    "email": "asha@example.com",
                    "password": "pw",
                    "language": "hi"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let created = body_json(res).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["language"], "hi");
        assert!(created.get("password").is_none());

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/login",
                serde_json::json!({ "email": "asha@example.com", "password": "pw" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["id"], id.as_str());

        let res = app
            .clone()
            .oneshot(get_request(&format!("/api/v1/profile/{}", id)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["name"], "Asha");

        let res = app
            .oneshot(post_json(
                &format!("/api/v1/profile/{}", id),
                serde_json::json!({ "language": "en" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["language"], "en");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        state.profiles.seed_demo_profiles().unwrap();
        let app = build_app(state);

        let res = app
            .oneshot(post_json(
                "/api/v1/auth/login",
                serde_json::json!({ "email": "demo@legal.com", "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(res).await["error"], "invalid email or password");
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));
        let body = serde_json::json!({
            "name": "Asha",
            "email": "asha@example.com",
            "password": "pw"
        });

        let res = app
            .clone()
            .oneshot(post_json("/api/v1/auth/signup", body.clone()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(post_json("/api/v1/auth/signup", body))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_profile_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(test_state(&dir));
        let res = app
            .oneshot(get_request("/api/v1/profile/no-such-id"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
