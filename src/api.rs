//! REST API Server for the advisory engine
//!
//! Exposes every core operation over JSON for the dashboard UI.
//! Per-user routes require the bearer token issued by login, and the token's
//! owner must match the username in the path.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::advisor::{Advisor, CardView};
use crate::analyzer::CardInsight;
use crate::auth::TokenKeys;
use crate::catalog;
use crate::error::AdvisoryError;
use crate::models::{FinancialGoal, FinancialSnapshot, RequestContext};
use crate::prompt::LearningScenario;
use crate::Result;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddCardRequest {
    pub name: String,
    pub limit: i64,
    #[serde(default)]
    pub features: String,
}

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub income: i64,
    pub cibil_score: i32,
    pub debt: i64,
    pub goal: FinancialGoal,
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct LessonRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub scenario: Option<LearningScenario>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

type ApiResult = (StatusCode, Json<ApiResponse>);

fn status_for(err: &AdvisoryError) -> StatusCode {
    match err {
        AdvisoryError::ValidationError(_) | AdvisoryError::EmptyInput(_) => StatusCode::BAD_REQUEST,
        AdvisoryError::InvalidCredentials | AdvisoryError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AdvisoryError::Forbidden(_) => StatusCode::FORBIDDEN,
        AdvisoryError::UserNotFound(_) => StatusCode::NOT_FOUND,
        AdvisoryError::AlreadyExists(_) => StatusCode::CONFLICT,
        AdvisoryError::ServiceError(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure(err: AdvisoryError) -> ApiResult {
    let status = status_for(&err);
    if !err.is_client_error() {
        error!(%status, error = %err, "request failed");
    }
    (status, Json(ApiResponse::error(err.to_string())))
}

fn respond<T: Serialize>(result: Result<T>, ok_status: StatusCode) -> ApiResult {
    match result.and_then(|data| Ok(serde_json::to_value(data)?)) {
        Ok(data) => (ok_status, Json(ApiResponse::success(data))),
        Err(e) => failure(e),
    }
}

/// =============================
/// Extractors
/// =============================

/// JSON body whose rejections use the response envelope and a 400.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiResult;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(failure(AdvisoryError::ValidationError(rejection.body_text()))),
        }
    }
}

/// Request context of a caller whose token owns the `:username` in the path.
pub struct Authenticated(pub RequestContext);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

#[async_trait]
impl FromRequestParts<ApiState> for Authenticated {
    type Rejection = ApiResult;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Path(username) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| failure(AdvisoryError::ValidationError(e.body_text())))?;

        let token = bearer_token(parts).ok_or_else(|| {
            failure(AdvisoryError::Unauthorized("missing bearer token".to_string()))
        })?;

        let ctx = state.keys.verify(token).map_err(failure)?;

        if ctx.username != username {
            warn!(owner = %ctx.username, requested = %username, "cross-user access rejected");
            return Err(failure(AdvisoryError::Forbidden(format!(
                "token does not grant access to {}",
                username
            ))));
        }

        match state.advisor.credentials().exists(&ctx.username).await {
            Ok(true) => Ok(Self(ctx)),
            Ok(false) => Err(failure(AdvisoryError::Unauthorized(
                "account no longer exists".to_string(),
            ))),
            Err(e) => Err(failure(e)),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub advisor: Arc<Advisor>,
    pub keys: TokenKeys,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Credentials
/// =============================

async fn register(
    State(state): State<ApiState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult {
    let result = state
        .advisor
        .credentials()
        .register(&req.username, &req.password)
        .await;
    respond(result, StatusCode::CREATED)
}

async fn login(
    State(state): State<ApiState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult {
    let result = state
        .advisor
        .credentials()
        .login(&req.username, &req.password)
        .await
        .and_then(|ctx| state.keys.issue(&ctx));
    respond(result, StatusCode::OK)
}

/// =============================
/// Portfolio
/// =============================

async fn list_cards(State(state): State<ApiState>, Authenticated(ctx): Authenticated) -> ApiResult {
    respond(state.advisor.card_views(&ctx).await, StatusCode::OK)
}

async fn add_card(
    State(state): State<ApiState>,
    Authenticated(ctx): Authenticated,
    ApiJson(req): ApiJson<AddCardRequest>,
) -> ApiResult {
    let result = state
        .advisor
        .portfolio()
        .create_card(&ctx, &req.name, req.limit, &req.features)
        .await
        .map(|card| CardView {
            insight: CardInsight::for_card(&card),
            card,
        });
    respond(result, StatusCode::CREATED)
}

async fn spend_analysis(
    State(state): State<ApiState>,
    Authenticated(ctx): Authenticated,
) -> ApiResult {
    respond(state.advisor.spend_analysis(&ctx).await, StatusCode::OK)
}

async fn demo_spend_analysis() -> ApiResult {
    respond(Ok(catalog::demo_spend_breakdown()), StatusCode::OK)
}

/// =============================
/// Advisory
/// =============================

async fn advise(
    State(state): State<ApiState>,
    Authenticated(ctx): Authenticated,
    ApiJson(req): ApiJson<AdviceRequest>,
) -> ApiResult {
    info!(username = %ctx.username, goal = %req.goal, "advisor request");

    let snapshot = FinancialSnapshot {
        income: req.income,
        cibil_score: req.cibil_score,
        debt: req.debt,
        goal: req.goal,
    };

    respond(
        state.advisor.consult(&ctx, snapshot, &req.query).await,
        StatusCode::OK,
    )
}

async fn history(State(state): State<ApiState>, Authenticated(ctx): Authenticated) -> ApiResult {
    respond(state.advisor.history(&ctx).await, StatusCode::OK)
}

async fn campus_sense(
    State(state): State<ApiState>,
    ApiJson(req): ApiJson<LessonRequest>,
) -> ApiResult {
    let result = match req.scenario {
        Some(scenario) => state.advisor.coach_scenario(scenario).await,
        None => {
            let question = req.question.unwrap_or_default();
            state.advisor.coach(&question).await
        }
    };

    respond(
        result.map(|lesson| serde_json::json!({ "lesson": lesson })),
        StatusCode::OK,
    )
}

async fn scenarios() -> ApiResult {
    let items: Vec<serde_json::Value> = LearningScenario::ALL
        .iter()
        .map(|s| {
            serde_json::json!({
                "id": s,
                "title": s.title(),
                "question": s.question(),
            })
        })
        .collect();
    respond(Ok(items), StatusCode::OK)
}

async fn offers() -> ApiResult {
    respond(Ok(catalog::offers()), StatusCode::OK)
}

/// =============================
/// Router
/// =============================

pub fn create_router(advisor: Arc<Advisor>, keys: TokenKeys) -> Router {
    let state = ApiState { advisor, keys };

    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/users/:username/cards", get(list_cards).post(add_card))
        .route("/api/users/:username/spend-analysis", get(spend_analysis))
        .route("/api/users/:username/advisor", post(advise))
        .route("/api/users/:username/history", get(history))
        .route("/api/spend-analysis/demo", get(demo_spend_analysis))
        .route("/api/campus-sense", post(campus_sense))
        .route("/api/campus-sense/scenarios", get(scenarios))
        .route("/api/offers", get(offers))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(advisor: Arc<Advisor>, keys: TokenKeys, port: u16) -> Result<()> {
    let router = create_router(advisor, keys);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockAdvisoryClient;
    use crate::config::AuthConfig;
    use crate::portfolio::MAX_CARD_LIMIT;
    use crate::store::InMemoryDocumentStore;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn keys() -> TokenKeys {
        TokenKeys::from_config(&AuthConfig {
            secret: Some("test-secret".to_string()),
            ..AuthConfig::default()
        })
    }

    fn app(client: MockAdvisoryClient) -> Router {
        let advisor = Advisor::new(Arc::new(InMemoryDocumentStore::new()), Arc::new(client));
        create_router(Arc::new(advisor), keys())
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Register and log in; returns the bearer token.
    async fn signed_in(app: &Router, username: &str) -> String {
        let creds = json!({"username": username, "password": "pw"});
        let (status, _) = send(app, "POST", "/api/auth/register", None, Some(creds.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(app, "POST", "/api/auth/login", None, Some(creds)).await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    fn advice(cibil_score: i64) -> Value {
        json!({
            "income": 20000,
            "cibil_score": cibil_score,
            "debt": 5000,
            "goal": "premium_card",
            "query": "Do I qualify for Card X?"
        })
    }

    #[test]
    fn test_client_errors_map_to_4xx() {
        let errors = [
            AdvisoryError::AlreadyExists("a".into()),
            AdvisoryError::InvalidCredentials,
            AdvisoryError::ValidationError("v".into()),
            AdvisoryError::EmptyInput("e".into()),
            AdvisoryError::UserNotFound("u".into()),
            AdvisoryError::Unauthorized("t".into()),
            AdvisoryError::Forbidden("f".into()),
            AdvisoryError::ServiceError("s".into()),
            AdvisoryError::DatabaseError("d".into()),
            AdvisoryError::TokenError("k".into()),
        ];
        for err in &errors {
            assert_eq!(status_for(err).is_client_error(), err.is_client_error(), "{}", err);
        }
    }

    #[test]
    fn test_unserializable_payload_is_server_error() {
        let mut data: HashMap<(i32, i32), i32> = HashMap::new();
        data.insert((1, 2), 3);

        let (status, Json(body)) = respond(Ok(data), StatusCode::OK);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.success);
        assert!(body.error.unwrap().starts_with("Serialization error"));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(MockAdvisoryClient::replying("ok")), "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_register_login_statuses() {
        let app = app(MockAdvisoryClient::replying("ok"));
        signed_in(&app, "asha").await;

        let creds = json!({"username": "asha", "password": "pw"});
        let (status, body) = send(&app, "POST", "/api/auth/register", None, Some(creds.clone())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);

        let (status, body) = send(&app, "POST", "/api/auth/login", None, Some(creds)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "asha");
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert!(keys().verify(body["data"]["token"].as_str().unwrap()).is_ok());

        let (status, _) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "asha", "password": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_response_hides_hash() {
        let app = app(MockAdvisoryClient::replying("ok"));
        let (_, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "ravi", "password": "pw"})),
        )
        .await;
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_history_requires_token() {
        let app = app(MockAdvisoryClient::replying("secret advice"));
        let token = signed_in(&app, "asha").await;

        let (status, _) = send(&app, "POST", "/api/users/asha/advisor", Some(&token), Some(advice(750))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/api/users/asha/history", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());

        let (status, _) = send(&app, "GET", "/api/users/asha/history", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "GET", "/api/users/asha/cards", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_cannot_reach_other_user() {
        let app = app(MockAdvisoryClient::replying("secret advice"));
        let asha = signed_in(&app, "asha").await;
        let ravi = signed_in(&app, "ravi").await;

        send(&app, "POST", "/api/users/asha/advisor", Some(&asha), Some(advice(750))).await;

        let (status, body) = send(&app, "GET", "/api/users/asha/history", Some(&ravi), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["data"].is_null());

        let (status, _) = send(
            &app,
            "POST",
            "/api/users/asha/cards",
            Some(&ravi),
            Some(json!({"name": "SBI Cashback", "limit": 20000})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, body) = send(&app, "GET", "/api/users/ravi/history", Some(&ravi), None).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_token_for_unknown_account_is_rejected() {
        let app = app(MockAdvisoryClient::replying("ok"));
        let token = keys().issue(&RequestContext::new("ghost")).unwrap().token;

        let (status, _) = send(
            &app,
            "POST",
            "/api/users/ghost/cards",
            Some(&token),
            Some(json!({"name": "SBI Cashback", "limit": 20000})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_card_flow() {
        let app = app(MockAdvisoryClient::replying("ok"));
        let token = signed_in(&app, "asha").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/users/asha/cards",
            Some(&token),
            Some(json!({"name": "SBI Cashback", "limit": 20000, "features": "5% online"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["insight"]["utilization"], 50.0);
        assert_eq!(body["data"]["insight"]["band"], "elevated");
        assert_eq!(body["data"]["insight"]["offer_hint"], "cashback_maximization");

        let (status, _) = send(
            &app,
            "POST",
            "/api/users/asha/cards",
            Some(&token),
            Some(json!({"name": "Axis Ace", "limit": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "GET", "/api/users/asha/cards", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, "GET", "/api/users/asha/spend-analysis", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_spend"], 10000);
    }

    #[tokio::test]
    async fn test_huge_limits_never_break_spend_analysis() {
        let app = app(MockAdvisoryClient::replying("ok"));
        let token = signed_in(&app, "asha").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/users/asha/cards",
            Some(&token),
            Some(json!({"name": "Axis Atlas", "limit": i64::MAX})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        for _ in 0..2 {
            let (status, _) = send(
                &app,
                "POST",
                "/api/users/asha/cards",
                Some(&token),
                Some(json!({"name": "Axis Atlas", "limit": MAX_CARD_LIMIT})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, "GET", "/api/users/asha/spend-analysis", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_limit"], 2 * MAX_CARD_LIMIT);
    }

    #[tokio::test]
    async fn test_demo_spend_analysis() {
        let app = app(MockAdvisoryClient::replying("ok"));
        let (status, body) = send(&app, "GET", "/api/spend-analysis/demo", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 19000);
        assert_eq!(body["data"]["categories"].as_array().unwrap().len(), 5);
        assert_eq!(body["data"]["categories"][3]["category"], "Shopping");
        assert_eq!(body["data"]["insights"][0]["level"], "tip");
        assert_eq!(body["data"]["insights"][1]["level"], "alert");
    }

    #[tokio::test]
    async fn test_advisor_records_history() {
        let app = app(MockAdvisoryClient::replying("Vue Verdict: Risky."));
        let token = signed_in(&app, "asha").await;

        let (status, body) = send(&app, "POST", "/api/users/asha/advisor", Some(&token), Some(advice(750))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["response"], "Vue Verdict: Risky.");

        let (status, body) = send(&app, "GET", "/api/users/asha/history", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let records = body["data"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["query"], "Do I qualify for Card X?");
        assert_eq!(records[0]["snapshot"]["goal"], "premium_card");
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_bad_request() {
        let app = app(MockAdvisoryClient::replying("ok"));
        let token = signed_in(&app, "asha").await;

        for score in [-5, 901] {
            let (status, body) =
                send(&app, "POST", "/api/users/asha/advisor", Some(&token), Some(advice(score))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert!(body["error"].as_str().unwrap().contains("CIBIL score"));
        }

        let (_, body) = send(&app, "GET", "/api/users/asha/history", Some(&token), None).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_uses_envelope() {
        let app = app(MockAdvisoryClient::replying("ok"));
        let token = signed_in(&app, "asha").await;

        let mut body = advice(750);
        body["goal"] = json!("win_lottery");

        let (status, body) = send(&app, "POST", "/api/users/asha/advisor", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
    }

    #[tokio::test]
    async fn test_advisor_service_failure_is_bad_gateway() {
        let app = app(MockAdvisoryClient::failing("quota exceeded"));
        let token = signed_in(&app, "asha").await;

        let (status, body) = send(&app, "POST", "/api/users/asha/advisor", Some(&token), Some(advice(700))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("quota exceeded"));

        let (_, body) = send(&app, "GET", "/api/users/asha/history", Some(&token), None).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_campus_sense() {
        let app = app(MockAdvisoryClient::replying("Lesson Goal: start small."));

        let (status, body) = send(
            &app,
            "POST",
            "/api/campus-sense",
            None,
            Some(json!({"question": "How do I start a SIP?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["lesson"], "Lesson Goal: start small.");

        let (status, _) = send(&app, "POST", "/api/campus-sense", None, Some(json!({"question": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/campus-sense",
            None,
            Some(json!({"scenario": "budgeting_basics"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "GET", "/api/campus-sense/scenarios", None, None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_offers() {
        let (status, body) = send(&app(MockAdvisoryClient::replying("ok")), "GET", "/api/offers", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 4);
        assert_eq!(body["data"][0]["card"], "IDFC First WOW");
    }
}
