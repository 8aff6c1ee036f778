use aimod::{
    config::Config,
    domain::{
        moderation::{
            blocked_comment::{BlockedComment, BlockedCommentFilter, NewBlockedComment},
            repository::{BlockedCommentRepository, SettingsRepository, VideoRepository},
            settings::{ENDPOINT_KEY, SettingsProvider},
            video::ModerationVideo,
        },
        shared::{errors::DomainError, pagination::PageRequest},
    },
    infrastructure::classifier::ai_classifier::AiClassifier,
    presentation::http::{
        middleware::user::{ReviewerClaims, issue_reviewer_token},
        routes::create_router,
        state::AppState,
    },
};
use async_trait::async_trait;
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::State,
    http::{Request, StatusCode, header},
    routing::post,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-jwt-secret";
pub const ROOT_USER_ID: i32 = 1;
pub const OWNER_USER_ID: i32 = 10;
pub const OTHER_USER_ID: i32 = 20;
/// Video owned by `OWNER_USER_ID`.
pub const OWNED_VIDEO_ID: i32 = 100;
/// Video owned by `OTHER_USER_ID`.
pub const FOREIGN_VIDEO_ID: i32 = 200;

// === In-memory blocked comment store ===

#[derive(Default)]
pub struct InMemoryBlockedComments {
    rows: Mutex<Vec<BlockedComment>>,
    fail_inserts: AtomicBool,
}

impl InMemoryBlockedComments {
    pub fn all(&self) -> Vec<BlockedComment> {
        self.rows.lock().unwrap().clone()
    }

    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    fn matches(filter: &BlockedCommentFilter, row: &BlockedComment) -> bool {
        filter.block_reason.is_none_or(|r| r == row.block_reason)
            && filter.approved.is_none_or(|a| a == row.approved)
            && filter.video_id.is_none_or(|v| row.video_id == Some(v))
            && filter
                .owner_video_ids
                .as_ref()
                .is_none_or(|ids| row.video_id.is_some_and(|v| ids.contains(&v)))
    }
}

#[async_trait]
impl BlockedCommentRepository for InMemoryBlockedComments {
    async fn insert(&self, comment: NewBlockedComment) -> Result<i32, DomainError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::InfrastructureError("insert refused".into()));
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(BlockedComment {
            id,
            text: comment.text,
            video_id: comment.video_id,
            video_uuid: comment.video_uuid,
            user_id: comment.user_id,
            user_username: comment.user_username,
            block_reason: comment.block_reason,
            score: comment.score,
            hate_score: comment.hate_score,
            language: comment.language,
            created_at: Utc::now(),
            approved: false,
            approved_by: None,
            approved_at: None,
        });
        Ok(id)
    }

    async fn list(
        &self,
        filter: &BlockedCommentFilter,
        page: PageRequest,
    ) -> Result<(Vec<BlockedComment>, i64), DomainError> {
        let mut matching: Vec<BlockedComment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| Self::matches(filter, row))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok((data, total))
    }

    async fn find_video_id(&self, id: i32) -> Result<Option<Option<i32>>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.video_id))
    }

    async fn approve(
        &self,
        id: i32,
        approver_id: i32,
    ) -> Result<Option<BlockedComment>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|r| r.id == id).map(|row| {
            row.approved = true;
            row.approved_by = Some(approver_id);
            row.approved_at = Some(Utc::now());
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

// === In-memory host videos ===

pub struct InMemoryVideos {
    videos: Vec<(ModerationVideo, i32)>,
}

impl InMemoryVideos {
    pub fn seeded() -> Self {
        let video = |id: i32, name: &str| ModerationVideo {
            id,
            uuid: Uuid::now_v7(),
            name: name.to_string(),
        };
        Self {
            videos: vec![
                (video(OWNED_VIDEO_ID, "Kochen mit Anna"), OWNER_USER_ID),
                (video(FOREIGN_VIDEO_ID, "Wandern im Harz"), OTHER_USER_ID),
            ],
        }
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideos {
    async fn owned_video_ids(&self, user_id: i32) -> Result<Vec<i32>, DomainError> {
        Ok(self
            .videos
            .iter()
            .filter(|(_, owner)| *owner == user_id)
            .map(|(v, _)| v.id)
            .collect())
    }

    async fn list_all(&self, limit: i64) -> Result<Vec<ModerationVideo>, DomainError> {
        Ok(self
            .videos
            .iter()
            .rev()
            .take(limit as usize)
            .map(|(v, _)| v.clone())
            .collect())
    }

    async fn list_by_ids(&self, ids: &[i32]) -> Result<Vec<ModerationVideo>, DomainError> {
        Ok(self
            .videos
            .iter()
            .filter(|(v, _)| ids.contains(&v.id))
            .map(|(v, _)| v.clone())
            .collect())
    }
}

// === In-memory settings ===

#[derive(Default)]
pub struct InMemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl InMemorySettings {
    pub fn put(&self, name: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettings {
    async fn get(&self, name: &str) -> Result<Option<String>, DomainError> {
        Ok(self.values.lock().unwrap().get(name).cloned())
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), DomainError> {
        self.put(name, value);
        Ok(())
    }

    async fn insert_default(&self, name: &str, value: &str) -> Result<(), DomainError> {
        self.values
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
        Ok(())
    }
}

// === Stub analysis service ===

#[derive(Clone)]
pub struct StubClassifier {
    reply: Arc<Mutex<(StatusCode, Value)>>,
    delay: Arc<Mutex<Duration>>,
    hits: Arc<AtomicUsize>,
}

impl StubClassifier {
    pub fn reply_with(&self, body: Value) {
        *self.reply.lock().unwrap() = (StatusCode::OK, body);
    }

    pub fn fail_with(&self, status: StatusCode) {
        *self.reply.lock().unwrap() = (status, json!({ "detail": "model unavailable" }));
    }

    pub fn delay_by(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn analyze(State(stub): State<StubClassifier>, Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    let delay = *stub.delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let (status, body) = stub.reply.lock().unwrap().clone();
    (status, Json(body))
}

/// Starts the stub service on an ephemeral port and returns its analyze URL.
async fn spawn_stub_classifier() -> (StubClassifier, String) {
    let stub = StubClassifier {
        reply: Arc::new(Mutex::new((StatusCode::OK, clean_german()))),
        delay: Arc::new(Mutex::new(Duration::ZERO)),
        hits: Arc::new(AtomicUsize::new(0)),
    };
    let app = Router::new()
        .route("/analyze", post(analyze))
        .with_state(stub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub classifier");
    let addr = listener.local_addr().expect("stub classifier address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub classifier crashed");
    });
    (stub, format!("http://{}/analyze", addr))
}

pub fn clean_german() -> Value {
    json!({
        "score": 0.05,
        "hate_score": 0.01,
        "language": "de",
        "is_german": true,
        "requires_moderation": false
    })
}

pub fn toxic_german(score: f64, hate_score: f64) -> Value {
    json!({
        "score": score,
        "hate_score": hate_score,
        "language": "de",
        "is_german": true,
        "requires_moderation": false
    })
}

pub fn foreign(language: &str) -> Value {
    json!({
        "score": 0.02,
        "hate_score": 0.01,
        "language": language,
        "is_german": false,
        "requires_moderation": true
    })
}

// === App ===

pub struct TestApp {
    pub app: Router,
    pub comments: Arc<InMemoryBlockedComments>,
    pub settings: Arc<InMemorySettings>,
    pub classifier: StubClassifier,
}

fn build_config() -> Config {
    Config {
        database_url: "postgres://unused@127.0.0.1/unused".to_string(),
        database_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: JWT_SECRET.to_string(),
        allowed_origins: Vec::new(),
        ignore_missing_migrations: true,
    }
}

pub async fn spawn_app() -> TestApp {
    let (classifier, endpoint) = spawn_stub_classifier().await;

    let comments = Arc::new(InMemoryBlockedComments::default());
    let settings = Arc::new(InMemorySettings::default());
    let provider = SettingsProvider::new(settings.clone());
    provider
        .register_defaults()
        .await
        .expect("failed to register defaults");
    settings.put(ENDPOINT_KEY, &endpoint);

    let ai = AiClassifier::new(provider).expect("failed to build classifier");
    let state = AppState::new(
        build_config(),
        comments.clone(),
        Arc::new(InMemoryVideos::seeded()),
        settings.clone(),
        Arc::new(ai),
    );

    TestApp {
        app: create_router(state),
        comments,
        settings,
        classifier,
    }
}

pub fn token_for(user_id: i32, role: i32) -> String {
    let claims = ReviewerClaims {
        sub: user_id,
        username: format!("user{}", user_id),
        role,
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    issue_reviewer_token(&claims, JWT_SECRET).expect("failed to sign token")
}

pub fn root_token() -> String {
    token_for(ROOT_USER_ID, 0)
}

pub fn owner_token() -> String {
    token_for(OWNER_USER_ID, 2)
}

pub fn other_token() -> String {
    token_for(OTHER_USER_ID, 2)
}

pub fn hook_request(target: &str, result: Value, params: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/hooks/{}", target))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "result": result, "params": params }).to_string(),
        ))
        .expect("failed to build hook request")
}

pub fn comment_payload(text: &str, video_id: i32) -> Value {
    json!({
        "commentBody": { "text": text },
        "video": { "id": video_id, "uuid": format!("uuid-{}", video_id) },
        "user": { "id": 55, "username": "kommentator" }
    })
}

pub fn review_request(method: &str, path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("/plugins/german-ai-mod/router{}", path));
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("failed to build review request")
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();
    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}
