//! Test utilities: an in-process mock of the REST API and identity toolkit.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::{Value, json};

pub use semillas::auth::{FirebaseAuth, IdpCredential};
pub use semillas::models::*;
pub use semillas::storage::{MemoryStorage, StorageAdapter, keys};
pub use semillas::{ApiClient, AppContext, ClientError};

/// Google credential the mock identity toolkit accepts.
pub const GOOD_GOOGLE_TOKEN: &str = "google-id-token-ok";
pub const SIGNED_IN_UID: &str = "u1";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub auth: Option<String>,
}

#[derive(Default)]
pub struct Backend {
    pub projects: Vec<Project>,
    pub members: HashMap<String, Vec<ProjectMembership>>,
    pub users: HashMap<String, User>,
    pub posts: HashMap<String, Vec<DiscussionPost>>,
    pub organizations: Vec<Value>,
    /// Raw bodies received on PUT /users/{id}
    pub user_updates: Vec<Value>,
    pub requests: Vec<RecordedRequest>,
    /// Make GET /projects answer 500
    pub fail_projects: bool,
    next_id: u32,
}

impl Backend {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct MockServer {
    pub base_url: String,
    pub state: Shared,
}

impl MockServer {
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    pub fn user_updates(&self) -> Vec<Value> {
        self.state.lock().unwrap().user_updates.clone()
    }

    pub fn identity_url(&self) -> String {
        format!("{}/idp", self.base_url)
    }
}

pub async fn spawn(backend: Backend) -> MockServer {
    let state: Shared = Arc::new(Mutex::new(backend));

    let app = Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/projects/{id}/join", post(join_project))
        .route("/projects/{id}/members", get(list_members))
        .route("/projects/{id}/members/{membership_id}", put(manage_member))
        .route(
            "/projects/{id}/discussions",
            get(list_posts).post(create_post),
        )
        .route("/users/{id}", get(get_user).put(update_user))
        .route("/organizations", get(list_organizations))
        .route("/idp/v1/accounts:signInWithIdp", post(sign_in_with_idp))
        // Path the auth emulator serves in dev mode
        .route(
            "/identitytoolkit.googleapis.com/v1/accounts:signInWithIdp",
            post(sign_in_with_idp),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockServer {
        base_url: format!("http://{}", addr),
        state,
    }
}

/// Context wired to the mock server, sharing one in-memory storage.
pub fn context(server: &MockServer) -> (AppContext<FirebaseAuth>, Arc<dyn StorageAdapter>) {
    let storage: Arc<dyn StorageAdapter> = Arc::new(MemoryStorage::new());
    let api = ApiClient::new(&server.base_url, Arc::clone(&storage), None).unwrap();
    let provider = FirebaseAuth::new(&server.identity_url(), "test-api-key").unwrap();
    (AppContext::new(api, provider), storage)
}

/// Unsigned JWT-shaped token carrying Firebase-style claims.
pub fn id_token_for(uid: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": uid, "user_id": uid, "exp": exp }).to_string());
    format!("{}.{}.signature", header, payload)
}

pub fn far_future() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

// ============ Fixtures ============

pub fn project(id: &str, title: &str, category: Option<&str>, created_at: &str) -> Project {
    Project {
        id: id.into(),
        title: title.into(),
        description: format!("Description of {}", title),
        image: format!("https://img.example/{}.png", id),
        owner: "owner-1".into(),
        category: category.map(String::from),
        location: None,
        volunteers_needed: 3,
        volunteer_requirements: None,
        status: ProjectStatus::Open,
        tags: vec![],
        created_at: created_at.into(),
        updated_at: created_at.into(),
    }
}

pub fn membership(id: &str, project_id: &str, user_id: &str, status: MembershipStatus) -> ProjectMembership {
    ProjectMembership {
        id: id.into(),
        project_id: project_id.into(),
        user_id: user_id.into(),
        role: MembershipRole::Volunteer,
        status,
        message: None,
        joined_at: "2024-01-10T12:00:00Z".into(),
    }
}

pub fn user(id: &str, name: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
        image: format!("https://img.example/{}.png", id),
        have: vec![],
        want: vec![],
        experience: None,
        interests: None,
        location: None,
        email: Some(format!("{}@example.com", id)),
    }
}

// ============ Handlers ============

async fn record(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let auth = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.lock().unwrap().requests.push(RecordedRequest {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        auth,
    });
    next.run(req).await
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "details": format!("{} not found", what) })),
    )
        .into_response()
}

async fn list_projects(State(state): State<Shared>) -> Response {
    let backend = state.lock().unwrap();
    if backend.fail_projects {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
            .into_response();
    }
    Json(json!({ "projects": backend.projects })).into_response()
}

async fn get_project(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let backend = state.lock().unwrap();
    match backend.projects.iter().find(|p| p.id == id) {
        Some(p) => Json(p.clone()).into_response(),
        None => not_found("Project"),
    }
}

async fn create_project(State(state): State<Shared>, Json(input): Json<CreateProject>) -> Response {
    let mut backend = state.lock().unwrap();
    if input.title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Bad request", "details": "title is required" })),
        )
            .into_response();
    }
    let id = backend.next_id("p");
    let now = chrono::Utc::now().to_rfc3339();
    let project = Project {
        id,
        title: input.title,
        description: input.description,
        image: input.image,
        owner: SIGNED_IN_UID.into(),
        category: input.category,
        location: input.location,
        volunteers_needed: input.volunteers_needed,
        volunteer_requirements: input.volunteer_requirements,
        status: ProjectStatus::Open,
        tags: input.tags,
        created_at: now.clone(),
        updated_at: now,
    };
    backend.projects.push(project.clone());
    (StatusCode::CREATED, Json(project)).into_response()
}

async fn update_project(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let Some(project) = backend.projects.iter_mut().find(|p| p.id == id) else {
        return not_found("Project");
    };
    if let Some(title) = input.get("title").and_then(Value::as_str) {
        project.title = title.to_string();
    }
    if let Some(status) = input.get("status") {
        project.status = serde_json::from_value(status.clone()).unwrap();
    }
    if let Some(category) = input.get("category") {
        project.category = category.as_str().map(String::from);
    }
    Json(project.clone()).into_response()
}

async fn delete_project(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut backend = state.lock().unwrap();
    let before = backend.projects.len();
    backend.projects.retain(|p| p.id != id);
    if backend.projects.len() == before {
        return not_found("Project");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn join_project(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    if !backend.projects.iter().any(|p| p.id == id) {
        return not_found("Project");
    }
    let membership_id = backend.next_id("m");
    let mut m = membership(&membership_id, &id, SIGNED_IN_UID, MembershipStatus::Pending);
    m.message = body.get("message").and_then(Value::as_str).map(String::from);
    backend.members.entry(id).or_default().push(m.clone());
    (StatusCode::CREATED, Json(m)).into_response()
}

async fn list_members(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let backend = state.lock().unwrap();
    let members = backend.members.get(&id).cloned().unwrap_or_default();
    Json(json!({ "members": members })).into_response()
}

async fn manage_member(
    State(state): State<Shared>,
    Path((id, membership_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let Some(m) = backend
        .members
        .get_mut(&id)
        .and_then(|ms| ms.iter_mut().find(|m| m.id == membership_id))
    else {
        return not_found("Membership");
    };
    if m.status != MembershipStatus::Pending {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "membership already decided" })),
        )
            .into_response();
    }
    let status: MembershipStatus = match serde_json::from_value(body["action"].clone()) {
        Ok(s) => s,
        Err(_) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "invalid action" })),
            )
                .into_response();
        }
    };
    m.status = status;
    Json(m.clone()).into_response()
}

async fn list_posts(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let backend = state.lock().unwrap();
    let posts = backend.posts.get(&id).cloned().unwrap_or_default();
    Json(json!({ "posts": posts })).into_response()
}

async fn create_post(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let post_id = backend.next_id("post");
    let post = DiscussionPost {
        id: post_id,
        content: body["content"].as_str().unwrap_or_default().to_string(),
        user_name: body["userName"].as_str().unwrap_or_default().to_string(),
        user_image: body["userImage"].as_str().unwrap_or_default().to_string(),
        attachments: body["attachments"].as_array().cloned().unwrap_or_default(),
        reply_to_post_id: body["replyToPostId"].as_str().map(String::from),
        created_at: Some(chrono::Utc::now().to_rfc3339()),
    };
    backend.posts.entry(id).or_default().push(post.clone());
    (StatusCode::CREATED, Json(post)).into_response()
}

async fn get_user(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let backend = state.lock().unwrap();
    match backend.users.get(&id) {
        Some(u) => Json(u.clone()).into_response(),
        None => not_found("User"),
    }
}

async fn update_user(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if headers.get(AUTHORIZATION).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response();
    }
    let mut backend = state.lock().unwrap();
    backend.user_updates.push(body.clone());
    let Some(user) = backend.users.get_mut(&id) else {
        return not_found("User");
    };
    if let Ok(update) = serde_json::from_value::<UpdateUser>(body) {
        user.name = update.name;
        user.image = update.image;
        user.have = update.have;
        user.want = update.want;
        user.experience = update.experience;
        user.interests = update.interests;
        user.location = update.location;
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_organizations(State(state): State<Shared>) -> Response {
    let backend = state.lock().unwrap();
    Json(json!({ "organizations": backend.organizations })).into_response()
}

async fn sign_in_with_idp(Json(body): Json<Value>) -> Response {
    let post_body = body["postBody"].as_str().unwrap_or_default();
    let expected = format!("id_token={}&providerId=google.com", GOOD_GOOGLE_TOKEN);
    if post_body != expected || body["returnSecureToken"] != json!(true) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": "INVALID_IDP_RESPONSE" } })),
        )
            .into_response();
    }
    Json(json!({
        "localId": SIGNED_IN_UID,
        "idToken": id_token_for(SIGNED_IN_UID, far_future()),
        "refreshToken": "refresh-1",
        "email": "u1@example.com",
        "displayName": "Ana",
        "expiresIn": "3600"
    }))
    .into_response()
}
