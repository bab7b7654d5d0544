use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    state::AppState,
    users::{
        dto::{CreatePersonRequest, PublicUser},
        error::{ErrorKind, RepoError},
        model::User,
        password::hash_password,
    },
};

const MIN_PASSWORD_LEN: usize = 8;

pub fn person_routes() -> Router<AppState> {
    Router::new()
        .route("/persons", get(list_persons).post(create_person))
        .route("/persons/:id", get(get_person))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
    }
    EMAIL_RE.is_match(email)
}

fn repo_error(err: RepoError) -> (StatusCode, String) {
    match err.kind() {
        ErrorKind::AlreadyExists => (StatusCode::CONFLICT, "Person already exists".into()),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "Person not found".into()),
        ErrorKind::Unknown => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".into(),
        ),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_person(
    State(state): State<AppState>,
    Json(mut payload): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<PublicUser>), (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();
    payload.login = payload.login.trim().to_string();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }
    if payload.login.is_empty() {
        warn!("empty login");
        return Err((StatusCode::BAD_REQUEST, "Login must not be empty".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }

    let hash = hash_password(&payload.password).map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    })?;

    let user = User::new(Uuid::new_v4(), payload.email, payload.login, hash);
    state.users.save(&user).await.map_err(repo_error)?;

    info!(user_id = %user.id, login = %user.login, "person created");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state))]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    let user = state.users.get_by_id(id).await.map_err(repo_error)?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn list_persons(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicUser>>, (StatusCode, String)> {
    let users = state.users.get_all().await.map_err(repo_error)?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_app;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn post_person(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/persons")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@x.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("no at sign.com"));
    }

    #[tokio::test]
    async fn create_then_fetch_person() {
        let app = build_app(AppState::fake());

        let (status, body) = send(
            app.clone(),
            post_person(json!({
                "email": "  A@X.com ",
                "login": "alice",
                "password": "correct-horse"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: PublicUser = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.email, "a@x.com");
        assert_eq!(created.about_me, None);

        let uri = format!("/api/v1/persons/{}", created.id);
        let (status, body) = send(app.clone(), get_req(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        let fetched: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched["login"], "alice");
        assert!(fetched.get("password_hash").is_none());

        let (status, body) = send(app, get_req("/api/v1/persons")).await;
        assert_eq!(status, StatusCode::OK);
        let all: Vec<PublicUser> = serde_json::from_slice(&body).unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let app = build_app(AppState::fake());
        let (status, _) = send(
            app.clone(),
            post_person(json!({"email": "a@x.com", "login": "alice", "password": "password1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            app,
            post_person(json!({"email": "a@x.com", "login": "bob", "password": "password2"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_person_is_not_found() {
        let app = build_app(AppState::fake());
        let uri = format!("/api/v1/persons/{}", Uuid::new_v4());
        let (status, _) = send(app, get_req(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_invalid_input() {
        let app = build_app(AppState::fake());
        for body in [
            json!({"email": "nope", "login": "alice", "password": "password1"}),
            json!({"email": "a@x.com", "login": "   ", "password": "password1"}),
            json!({"email": "a@x.com", "login": "alice", "password": "short"}),
        ] {
            let (status, _) = send(app.clone(), post_person(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }

        let (_, body) = send(app, get_req("/api/v1/persons")).await;
        let all: Vec<PublicUser> = serde_json::from_slice(&body).unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn list_is_empty_initially() {
        let app = build_app(AppState::fake());
        let (status, body) = send(app, get_req("/api/v1/persons")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }
}
