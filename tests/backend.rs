//! Integration tests against an in-process stub backend.
//!
//! The stub mirrors the backend contract: `/login` issues a fixed token for
//! admin/admin, the protected routes check the bearer header, and the
//! collections live in memory. Per-collection hit counters make refetch
//! behavior observable.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use reqwest::Method;

use dossier::api::client::ApiClient;
use dossier::api::dto::{
    Greeting, HelloRequest, HelloResponse, LoginRequest, Person, PersonCreate, TokenResponse,
};
use dossier::dashboard::{Dashboard, ListView, Notice};

const TOKEN: &str = "abc";

#[derive(Default)]
struct Backend {
    greetings: Mutex<Vec<Greeting>>,
    people: Mutex<Vec<Person>>,
    greetings_hits: AtomicUsize,
    people_hits: AtomicUsize,
    /// When set, every protected route answers 401 (simulated expiry)
    reject_protected: AtomicBool,
}

impl Backend {
    fn authorized(&self, headers: &HeaderMap) -> bool {
        if self.reject_protected.load(Ordering::SeqCst) {
            return false;
        }
        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            == Some(format!("Bearer {TOKEN}").as_str())
    }
}

type Rejection = (StatusCode, String);

fn unauthorized() -> Rejection {
    (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
}

async fn login(Json(body): Json<LoginRequest>) -> Result<Json<TokenResponse>, Rejection> {
    if body.username == "admin" && body.password == "admin" {
        Ok(Json(TokenResponse {
            access_token: TOKEN.to_string(),
        }))
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            "Incorrect username or password".to_string(),
        ))
    }
}

async fn hello(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<HelloRequest>,
) -> Result<Json<HelloResponse>, Rejection> {
    if !backend.authorized(&headers) {
        return Err(unauthorized());
    }

    let mut greetings = backend.greetings.lock().unwrap();
    let id = greetings.len() as i64 + 1;
    greetings.push(Greeting {
        id,
        name: body.name.clone(),
        created_at: Utc::now(),
    });

    Ok(Json(HelloResponse {
        message: format!("Hello, {}! Authenticated as admin.", body.name),
    }))
}

async fn list_greetings(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Greeting>>, Rejection> {
    if !backend.authorized(&headers) {
        return Err(unauthorized());
    }
    backend.greetings_hits.fetch_add(1, Ordering::SeqCst);
    Ok(Json(backend.greetings.lock().unwrap().clone()))
}

async fn create_person(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<PersonCreate>,
) -> Result<(StatusCode, Json<Person>), Rejection> {
    if !backend.authorized(&headers) {
        return Err(unauthorized());
    }

    let mut people = backend.people.lock().unwrap();
    let person = Person {
        id: people.len() as i64 + 1,
        full_name: body.full_name,
        telegram: body.telegram,
        photo_url: body.photo_url,
        note: body.note,
        created_at: Utc::now(),
    };
    people.push(person.clone());

    Ok((StatusCode::CREATED, Json(person)))
}

async fn list_people(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Person>>, Rejection> {
    if !backend.authorized(&headers) {
        return Err(unauthorized());
    }
    backend.people_hits.fetch_add(1, Ordering::SeqCst);
    Ok(Json(backend.people.lock().unwrap().clone()))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Reflects the request headers the client sent
async fn echo_headers(headers: HeaderMap) -> Json<serde_json::Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    Json(serde_json::json!({
        "content_type": header("content-type"),
        "authorization": header("authorization"),
    }))
}

/// Always fails with an empty body
async fn boom() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_backend() -> (Arc<Backend>, ApiClient) {
    let backend = Arc::new(Backend::default());

    let app = Router::new()
        .route("/login", post(login))
        .route("/hello", post(hello))
        .route("/greetings", get(list_greetings))
        .route("/people", get(list_people).post(create_person))
        .route("/health", get(health))
        .route("/echo", get(echo_headers))
        .route("/boom", get(boom))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, ApiClient::new(format!("http://{addr}")))
}

// ============================================
// Request helper properties
// ============================================

#[tokio::test]
async fn request_sets_json_content_type_and_bearer_iff_token() {
    let (_backend, client) = spawn_backend().await;

    let with_token: serde_json::Value = client
        .request(Method::GET, "/echo", None::<&()>, Some("abc"))
        .await
        .unwrap();
    assert_eq!(with_token["content_type"], "application/json");
    assert_eq!(with_token["authorization"], "Bearer abc");

    let without_token: serde_json::Value = client
        .request(Method::GET, "/echo", None::<&()>, None)
        .await
        .unwrap();
    assert_eq!(without_token["content_type"], "application/json");
    assert!(without_token["authorization"].is_null());
}

#[tokio::test]
async fn failure_carries_response_body_text() {
    let (_backend, client) = spawn_backend().await;

    let error = client
        .login(&LoginRequest {
            username: "admin".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.message, "Incorrect username or password");
}

#[tokio::test]
async fn failure_with_empty_body_falls_back_to_status_description() {
    let (_backend, client) = spawn_backend().await;

    let error = client
        .request::<serde_json::Value, ()>(Method::GET, "/boom", None, None)
        .await
        .unwrap_err();

    assert_eq!(error.message, "500 Internal Server Error");
}

#[tokio::test]
async fn health_probe_needs_no_token() {
    let (_backend, client) = spawn_backend().await;
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
}

// ============================================
// Session and cache behavior
// ============================================

#[tokio::test]
async fn login_scenario_enables_protected_reads() {
    let (backend, client) = spawn_backend().await;
    let mut dashboard = Dashboard::new(client);

    assert_eq!(dashboard.greetings().await, ListView::AuthRequired);
    assert_eq!(backend.greetings_hits.load(Ordering::SeqCst), 0);

    dashboard.login("admin", "admin").await;
    assert!(dashboard.is_authenticated());
    assert_eq!(
        dashboard.drain_notices(),
        vec![Notice::Success("Logged in".to_string())]
    );

    assert_eq!(dashboard.greetings().await, ListView::Rows(Vec::new()));
    assert_eq!(backend.greetings_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_login_surfaces_notice_and_keeps_prior_token() {
    let (_backend, client) = spawn_backend().await;
    let mut dashboard = Dashboard::new(client);

    dashboard.login("admin", "admin").await;
    dashboard.drain_notices();

    dashboard.login("admin", "wrong").await;
    assert!(dashboard.is_authenticated());
    assert_eq!(
        dashboard.drain_notices(),
        vec![Notice::Error("Incorrect username or password".to_string())]
    );

    // The prior token keeps working
    assert!(matches!(dashboard.people().await, ListView::Rows(_)));
}

#[tokio::test]
async fn reads_serve_from_cache_until_a_mutation_invalidates() {
    let (backend, client) = spawn_backend().await;
    let mut dashboard = Dashboard::new(client);

    dashboard.login("admin", "admin").await;

    dashboard.greetings().await;
    dashboard.greetings().await;
    assert_eq!(backend.greetings_hits.load(Ordering::SeqCst), 1);

    dashboard.say_hello("World").await;
    let notices = dashboard.drain_notices();
    assert!(notices
        .iter()
        .any(|n| n.message() == "Hello, World! Authenticated as admin."));

    let view = dashboard.greetings().await;
    assert_eq!(backend.greetings_hits.load(Ordering::SeqCst), 2);
    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.rows()[0].name, "World");
}

#[tokio::test]
async fn create_person_with_only_full_name() {
    let (backend, client) = spawn_backend().await;
    let mut dashboard = Dashboard::new(client);

    dashboard.login("admin", "admin").await;
    dashboard.create_person(PersonCreate::new("Ivan Ivanov")).await;

    let view = dashboard.people().await;
    assert_eq!(view.rows().len(), 1);
    let person = &view.rows()[0];
    assert_eq!(person.full_name, "Ivan Ivanov");
    assert!(person.telegram.is_none());
    assert!(person.photo_url.is_none());
    assert!(person.note.is_none());

    assert_eq!(backend.people_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn create_person_mutation_invalidates_people_only() {
    let (backend, client) = spawn_backend().await;
    let mut dashboard = Dashboard::new(client);

    dashboard.login("admin", "admin").await;
    dashboard.greetings().await;
    dashboard.people().await;

    dashboard
        .create_person(PersonCreate::new("Ivan Ivanov").telegram("@ivan"))
        .await;
    dashboard.greetings().await;
    dashboard.people().await;

    // Greetings stayed cached; people refetched
    assert_eq!(backend.greetings_hits.load(Ordering::SeqCst), 1);
    assert_eq!(backend.people_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn logout_discards_caches_and_disables_reads() {
    let (backend, client) = spawn_backend().await;
    let mut dashboard = Dashboard::new(client);

    dashboard.login("admin", "admin").await;
    dashboard.drain_notices();
    dashboard.people().await;
    assert_eq!(backend.people_hits.load(Ordering::SeqCst), 1);

    dashboard.logout();
    assert!(!dashboard.is_authenticated());

    // Disabled read, no network call
    assert_eq!(dashboard.people().await, ListView::AuthRequired);
    assert_eq!(backend.people_hits.load(Ordering::SeqCst), 1);

    // Mutations are refused locally too
    let before = backend.greetings.lock().unwrap().len();
    dashboard.say_hello("World").await;
    assert_eq!(
        dashboard.drain_notices(),
        vec![Notice::Error("Authentication required".to_string())]
    );
    assert_eq!(backend.greetings.lock().unwrap().len(), before);

    // A fresh login enables the reads again
    dashboard.login("admin", "admin").await;
    assert!(matches!(dashboard.people().await, ListView::Rows(_)));
    assert_eq!(backend.people_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn expired_token_surfaces_error_but_never_forces_logout() {
    let (backend, client) = spawn_backend().await;
    let mut dashboard = Dashboard::new(client);

    dashboard.login("admin", "admin").await;
    dashboard.drain_notices();

    backend.reject_protected.store(true, Ordering::SeqCst);

    dashboard.say_hello("World").await;
    assert_eq!(
        dashboard.drain_notices(),
        vec![Notice::Error("Not authenticated".to_string())]
    );
    // Uniform failure handling: the session stays authenticated
    assert!(dashboard.is_authenticated());

    // A failed read yields an empty row set and stays stale
    let view = dashboard.greetings().await;
    assert_eq!(view, ListView::Rows(Vec::new()));
    assert!(dashboard.drain_notices().iter().any(Notice::is_error));

    // Once the backend accepts the token again, the next access refetches
    backend.reject_protected.store(false, Ordering::SeqCst);
    assert!(matches!(dashboard.greetings().await, ListView::Rows(_)));
    assert_eq!(backend.greetings_hits.load(Ordering::SeqCst), 1);
}
