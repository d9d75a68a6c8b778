// SPDX-License-Identifier: MIT

//! In-process mock of the DivingSpace API.
//!
//! Binds an axum router to an ephemeral port and serves just enough of
//! the platform's endpoints for the client to run real request cycles:
//! JWT login/refresh, paginated lists with real `next` URLs, and the
//! mutation endpoints with request counters the tests assert on.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use divingspace_client::{ApiClient, Config, Notices, Session};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const USERNAME: &str = "diver";
pub const PASSWORD: &str = "depth-2026";
pub const PAGE_SIZE: usize = 2;

/// Unsigned JWT carrying only `exp`; the client never verifies
/// signatures, it just peeks at the expiry.
pub fn jwt(exp: i64) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
    format!("{header}.{payload}.sig")
}

fn in_one_hour() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

pub struct MockState {
    pub base_url: String,
    pub username: Mutex<String>,
    pub access_token: Mutex<String>,
    pub refresh_token: Mutex<String>,

    pub posts: Mutex<Vec<Value>>,
    pub comments: Mutex<Vec<Value>>,
    pub bookings: Mutex<Vec<Value>>,
    pub courses: Mutex<Vec<Value>>,
    pub profiles: Mutex<Vec<Value>>,

    pub next_id: AtomicU64,
    pub refresh_count: AtomicUsize,
    pub like_count: AtomicUsize,
    pub put_count: AtomicUsize,
    pub delete_count: AtomicUsize,

    /// Fail every mutation endpoint with a 500 while set.
    pub fail_mutations: AtomicBool,
    /// Answer the next booking update with a confirmation demand.
    pub demand_booking_confirm: AtomicBool,
}

impl MockState {
    fn new(base_url: String) -> Self {
        let reviews = vec![
            json!({"id": 31, "user": "ann", "content": "Great intro.", "rating": 4, "course": 3, "created_at": "2026-07-01"}),
            json!({"id": 32, "user": "diver", "content": "Loved it.", "rating": 5, "course": 3, "created_at": "2026-07-02"}),
        ];

        Self {
            base_url,
            username: Mutex::new(USERNAME.to_string()),
            access_token: Mutex::new(jwt(in_one_hour())),
            refresh_token: Mutex::new(jwt(in_one_hour())),
            posts: Mutex::new(vec![
                post_value(1, "ben", 1, "Wreck dive at dawn", 1, 3, None),
                post_value(2, "ann", 2, "Night dive lights", 3, 0, None),
                post_value(3, "ann", 2, "Reef cleanup", 0, 0, None),
                post_value(4, "ben", 1, "New wetsuit review", 1, 5, None),
                post_value(5, "ann", 2, "Kelp forest photos", 0, 2, None),
            ]),
            comments: Mutex::new(vec![
                json!({"id": 101, "owner": "diver", "profile_id": 6, "profile_image": null,
                       "post": 1, "content": "Amazing visibility!", "created_at": "2026-08-01", "updated_at": "2026-08-01"}),
                json!({"id": 102, "owner": "ann", "profile_id": 2, "profile_image": null,
                       "post": 1, "content": "Which site was this?", "created_at": "2026-08-02", "updated_at": "2026-08-02"}),
                json!({"id": 103, "owner": "diver", "profile_id": 6, "profile_image": null,
                       "post": 1, "content": "Adding it to my list.", "created_at": "2026-08-03", "updated_at": "2026-08-03"}),
            ]),
            bookings: Mutex::new(vec![
                json!({"id": 11, "date": "2026-09-01", "time": "09:00", "course": 3,
                       "course_name": "Open Water", "additional_info": ""}),
                json!({"id": 12, "date": "2026-09-02", "time": "15:00", "course": 4,
                       "course_name": "Advanced", "additional_info": "bring own fins"}),
            ]),
            courses: Mutex::new(vec![
                json!({"id": 3, "slug": "open-water", "title": "Open Water", "description": "Start here.",
                       "course_type": "beginner", "price": "299.00", "price_display": "€299",
                       "image": null, "average_rating": 4.5, "reviews": reviews}),
                json!({"id": 4, "slug": "advanced", "title": "Advanced", "description": "Go deeper.",
                       "course_type": "advanced", "price": "399.00", "price_display": "€399",
                       "image": null, "average_rating": 0.0, "reviews": []}),
            ]),
            profiles: Mutex::new(vec![
                json!({"id": 6, "owner": "diver", "name": "", "content": "Certified since 2020.",
                       "image": null, "posts_count": 0, "followers_count": 1, "following_count": 2,
                       "following_id": null, "created_at": "2026-01-01"}),
                json!({"id": 2, "owner": "ann", "name": "Ann", "content": "Instructor.",
                       "image": null, "posts_count": 3, "followers_count": 5, "following_count": 1,
                       "following_id": null, "created_at": "2026-01-01"}),
            ]),
            next_id: AtomicU64::new(1000),
            refresh_count: AtomicUsize::new(0),
            like_count: AtomicUsize::new(0),
            put_count: AtomicUsize::new(0),
            delete_count: AtomicUsize::new(0),
            fail_mutations: AtomicBool::new(false),
            demand_booking_confirm: AtomicBool::new(false),
        }
    }

    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn current_user(&self) -> Value {
        json!({
            "pk": 6,
            "username": self.username.lock().unwrap().clone(),
            "email": "",
            "first_name": "",
            "last_name": "",
            "profile_id": 6,
            "profile_image": null,
        })
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.access_token.lock().unwrap());
        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            == Some(expected.as_str())
    }

    /// Invalidate the access token the client is holding, as if it had
    /// expired server-side. Uses a different expiry so the encoded
    /// token cannot collide with the one issued at login.
    pub fn rotate_access_token(&self) {
        *self.access_token.lock().unwrap() = jwt(chrono::Utc::now().timestamp() + 7200);
    }
}

fn post_value(
    id: u64,
    owner: &str,
    profile_id: u64,
    title: &str,
    likes: i64,
    comments: i64,
    like_id: Option<u64>,
) -> Value {
    json!({
        "id": id, "owner": owner, "profile_id": profile_id, "profile_image": null,
        "title": title, "content": "", "image": null,
        "comments_count": comments, "likes_count": likes, "like_id": like_id,
        "created_at": "2026-08-01", "updated_at": "2026-08-01",
    })
}

pub struct MockApi {
    pub state: Arc<MockState>,
    pub base_url: String,
    _server: tokio::task::JoinHandle<()>,
}

/// Start the mock API on an ephemeral port.
pub async fn start() -> MockApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("local addr");
    let base_url = format!("http://{addr}");

    let state = Arc::new(MockState::new(base_url.clone()));
    let app = router(state.clone());
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    MockApi {
        state,
        base_url,
        _server: server,
    }
}

/// Client + notices + session wired at the mock, session in memory.
pub fn client_for(api: &MockApi) -> (ApiClient, Notices, Session) {
    let config = Config {
        api_base_url: api.base_url.clone(),
        request_timeout_secs: 5,
        session_file: None,
    };
    let session = Session::in_memory();
    let client = ApiClient::new(&config, session.clone()).expect("client");
    (client, Notices::new(), session)
}

pub async fn sign_in(client: &ApiClient) {
    client.login(USERNAME, PASSWORD).await.expect("sign in");
}

// ─── Router ──────────────────────────────────────────────────────────────────

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/dj-rest-auth/login/", post(login))
        .route("/dj-rest-auth/logout/", post(|| async { StatusCode::OK }))
        .route("/dj-rest-auth/registration/", post(register))
        .route("/dj-rest-auth/token/refresh/", post(refresh))
        .route("/dj-rest-auth/user/", get(get_user).put(put_user))
        .route(
            "/dj-rest-auth/password/change/",
            post(|| async { Json(json!({"detail": "New password has been saved."})) }),
        )
        .route("/posts/", get(list_posts))
        .route(
            "/posts/{id}/",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/likes/", post(create_like))
        .route("/likes/{id}/", delete(delete_like))
        .route("/comments/", get(list_comments).post(create_comment))
        .route(
            "/comments/{id}/",
            put(update_comment).delete(delete_comment),
        )
        .route("/profiles/{id}/", get(get_profile).put(update_profile))
        .route("/followers/", post(create_follower))
        .route("/followers/{id}/", delete(delete_follower))
        .route("/courses/", get(list_courses))
        .route("/courses/{slug}/", get(get_course))
        .route("/reviews/", post(create_review))
        .route("/reviews/{id}/", put(update_review).delete(delete_review))
        .route("/bookings/", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{id}/",
            put(update_booking).delete(delete_booking),
        )
        .with_state(state)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Authentication credentials were not provided."})),
    )
        .into_response()
}

fn mutation_guard(state: &MockState, headers: &HeaderMap) -> Option<Response> {
    if !state.authorized(headers) {
        return Some(unauthorized());
    }
    if state.fail_mutations.load(Ordering::SeqCst) {
        return Some(
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "Server error."})),
            )
                .into_response(),
        );
    }
    None
}

fn paginate(state: &MockState, path: &str, items: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let page: usize = params
        .get("page")
        .and_then(|value| value.parse().ok())
        .unwrap_or(1);
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(items.len());
    let slice: Vec<Value> = items
        .get(start..end)
        .map(|window| window.to_vec())
        .unwrap_or_default();

    let next = if end < items.len() {
        let mut query = format!("page={}", page + 1);
        for key in ["search", "owner__profile", "post"] {
            if let Some(value) = params.get(key) {
                query.push_str(&format!("&{key}={value}"));
            }
        }
        Value::String(format!("{}{}?{}", state.base_url, path, query))
    } else {
        Value::Null
    };

    json!({"results": slice, "next": next, "previous": null, "count": items.len()})
}

// ─── Auth handlers ───────────────────────────────────────────────────────────

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if username != *state.username.lock().unwrap() || password != PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Unable to log in with provided credentials."]})),
        )
            .into_response();
    }

    Json(json!({
        "access_token": state.access_token.lock().unwrap().clone(),
        "refresh_token": state.refresh_token.lock().unwrap().clone(),
        "user": state.current_user(),
    }))
    .into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["username"].as_str() == Some("taken") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"username": ["A user with that username already exists."]})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({}))).into_response()
}

async fn refresh(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.refresh_count.fetch_add(1, Ordering::SeqCst);

    if body["refresh"].as_str() != Some(state.refresh_token.lock().unwrap().as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Token is invalid or expired", "code": "token_not_valid"})),
        )
            .into_response();
    }

    let access = jwt(in_one_hour());
    *state.access_token.lock().unwrap() = access.clone();
    Json(json!({"access": access})).into_response()
}

async fn get_user(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(state.current_user()).into_response()
}

async fn put_user(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.put_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let username = body["username"].as_str().unwrap_or_default().to_string();
    if username == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"username": ["A user with that username already exists."]})),
        )
            .into_response();
    }

    *state.username.lock().unwrap() = username;
    Json(state.current_user()).into_response()
}

// ─── Post handlers ───────────────────────────────────────────────────────────

async fn list_posts(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let posts = state.posts.lock().unwrap().clone();
    let search = params.get("search").cloned().unwrap_or_default();
    let owner_profile = params.get("owner__profile").cloned();

    let filtered: Vec<Value> = posts
        .into_iter()
        .filter(|post| {
            let title = post["title"].as_str().unwrap_or_default().to_lowercase();
            let matches_search = search.is_empty() || title.contains(&search.to_lowercase());
            let matches_owner = owner_profile
                .as_ref()
                .map(|id| post["profile_id"].to_string() == *id)
                .unwrap_or(true);
            matches_search && matches_owner
        })
        .collect();

    Json(paginate(&state, "/posts/", filtered, &params)).into_response()
}

async fn get_post(State(state): State<Arc<MockState>>, Path(id): Path<u64>) -> Response {
    let posts = state.posts.lock().unwrap();
    match posts.iter().find(|post| post["id"] == json!(id)) {
        Some(post) => Json(post.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_post(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.put_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut has_image = false;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            has_image = true;
            let _ = field.bytes().await;
        } else if let Ok(text) = field.text().await {
            fields.insert(name, text);
        }
    }

    let mut posts = state.posts.lock().unwrap();
    match posts.iter_mut().find(|post| post["id"] == json!(id)) {
        Some(post) => {
            if let Some(title) = fields.get("title") {
                post["title"] = json!(title);
            }
            if let Some(content) = fields.get("content") {
                post["content"] = json!(content);
            }
            if has_image {
                post["image"] = json!(format!("https://cdn.divingspace.test/posts/{id}.jpg"));
            }
            post["updated_at"] = json!("2026-08-07");
            Json(post.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_post(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    state.delete_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }
    state
        .posts
        .lock()
        .unwrap()
        .retain(|post| post["id"] != json!(id));
    StatusCode::NO_CONTENT.into_response()
}

async fn create_like(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.like_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let id = state.allocate_id();
    let post = body["post"].clone();
    (StatusCode::CREATED, Json(json!({"id": id, "post": post}))).into_response()
}

async fn delete_like(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    state.delete_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }
    StatusCode::NO_CONTENT.into_response()
}

// ─── Comment handlers ────────────────────────────────────────────────────────

async fn list_comments(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let comments = state.comments.lock().unwrap().clone();
    let post = params.get("post").cloned();
    let filtered: Vec<Value> = comments
        .into_iter()
        .filter(|comment| {
            post.as_ref()
                .map(|id| comment["post"].to_string() == *id)
                .unwrap_or(true)
        })
        .collect();

    Json(paginate(&state, "/comments/", filtered, &params)).into_response()
}

async fn create_comment(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let comment = json!({
        "id": state.allocate_id(),
        "owner": state.username.lock().unwrap().clone(),
        "profile_id": 6,
        "profile_image": null,
        "post": body["post"],
        "content": body["content"],
        "created_at": "2026-08-07",
        "updated_at": "2026-08-07",
    });
    state.comments.lock().unwrap().insert(0, comment.clone());
    (StatusCode::CREATED, Json(comment)).into_response()
}

async fn update_comment(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.put_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let mut comments = state.comments.lock().unwrap();
    match comments.iter_mut().find(|comment| comment["id"] == json!(id)) {
        Some(comment) => {
            comment["content"] = body["content"].clone();
            comment["updated_at"] = json!("2026-08-07");
            Json(comment.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_comment(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    state.delete_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }
    state
        .comments
        .lock()
        .unwrap()
        .retain(|comment| comment["id"] != json!(id));
    StatusCode::NO_CONTENT.into_response()
}

// ─── Profile handlers ────────────────────────────────────────────────────────

async fn get_profile(State(state): State<Arc<MockState>>, Path(id): Path<u64>) -> Response {
    let profiles = state.profiles.lock().unwrap();
    match profiles.iter().find(|profile| profile["id"] == json!(id)) {
        Some(profile) => Json(profile.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_profile(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.put_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut has_image = false;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            has_image = true;
            let _ = field.bytes().await;
        } else if let Ok(text) = field.text().await {
            fields.insert(name, text);
        }
    }

    let mut profiles = state.profiles.lock().unwrap();
    match profiles.iter_mut().find(|profile| profile["id"] == json!(id)) {
        Some(profile) => {
            if let Some(name) = fields.get("name") {
                profile["name"] = json!(name);
            }
            if let Some(content) = fields.get("content") {
                profile["content"] = json!(content);
            }
            if has_image {
                profile["image"] = json!(format!("https://cdn.divingspace.test/avatars/{id}.jpg"));
            }
            Json(profile.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn create_follower(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }
    let id = state.allocate_id();
    (
        StatusCode::CREATED,
        Json(json!({"id": id, "followed": body["followed"]})),
    )
        .into_response()
}

async fn delete_follower(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }
    StatusCode::NO_CONTENT.into_response()
}

// ─── Course and review handlers ──────────────────────────────────────────────

async fn list_courses(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let courses = state.courses.lock().unwrap().clone();
    Json(paginate(&state, "/courses/", courses, &params)).into_response()
}

async fn get_course(State(state): State<Arc<MockState>>, Path(slug): Path<String>) -> Response {
    let courses = state.courses.lock().unwrap();
    match courses.iter().find(|course| course["slug"] == json!(slug)) {
        Some(course) => Json(course.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_review(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let review = json!({
        "id": state.allocate_id(),
        "user": state.username.lock().unwrap().clone(),
        "content": body["content"],
        "rating": body["rating"],
        "course": body["course"],
        "created_at": "2026-08-07",
    });

    let mut courses = state.courses.lock().unwrap();
    if let Some(course) = courses
        .iter_mut()
        .find(|course| course["id"] == body["course"])
    {
        if let Some(reviews) = course["reviews"].as_array_mut() {
            reviews.insert(0, review.clone());
        }
    }
    (StatusCode::CREATED, Json(review)).into_response()
}

async fn update_review(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.put_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let mut courses = state.courses.lock().unwrap();
    for course in courses.iter_mut() {
        if let Some(reviews) = course["reviews"].as_array_mut() {
            if let Some(review) = reviews.iter_mut().find(|review| review["id"] == json!(id)) {
                review["content"] = body["content"].clone();
                review["rating"] = body["rating"].clone();
                return Json(review.clone()).into_response();
            }
        }
    }
    not_found()
}

async fn delete_review(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    state.delete_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let mut courses = state.courses.lock().unwrap();
    for course in courses.iter_mut() {
        if let Some(reviews) = course["reviews"].as_array_mut() {
            reviews.retain(|review| review["id"] != json!(id));
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

// ─── Booking handlers ────────────────────────────────────────────────────────

async fn list_bookings(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let bookings = state.bookings.lock().unwrap().clone();
    Json(paginate(&state, "/bookings/", bookings, &params)).into_response()
}

async fn create_booking(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    let booking = json!({
        "id": state.allocate_id(),
        "date": body["date"],
        "time": body["time"],
        "course": body["course"],
        "course_name": "Open Water",
        "additional_info": body["additional_info"],
    });
    state.bookings.lock().unwrap().push(booking.clone());
    (StatusCode::CREATED, Json(booking)).into_response()
}

async fn update_booking(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.put_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }

    if state.demand_booking_confirm.swap(false, Ordering::SeqCst) {
        return Json(json!({"confirm_changes": true})).into_response();
    }

    let mut bookings = state.bookings.lock().unwrap();
    match bookings.iter_mut().find(|booking| booking["id"] == json!(id)) {
        Some(booking) => {
            for key in ["date", "time", "course", "additional_info"] {
                if !body[key].is_null() {
                    booking[key] = body[key].clone();
                }
            }
            Json(booking.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_booking(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    state.delete_count.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = mutation_guard(&state, &headers) {
        return response;
    }
    state
        .bookings
        .lock()
        .unwrap()
        .retain(|booking| booking["id"] != json!(id));
    StatusCode::NO_CONTENT.into_response()
}
