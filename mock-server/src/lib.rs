use std::future::IntoFuture;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const COMMAND_PREFIX: &str = "/api/persons";
pub const QUERY_PREFIX: &str = "/api/query";

const NAME_MAX_CHARS: usize = 120;
const EMAIL_MAX_CHARS: usize = 180;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreatePerson {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdatePerson {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Insertion-ordered so listings come back in creation order.
pub type Store = Arc<RwLock<IndexMap<String, Person>>>;

pub fn new_store() -> Store {
    Arc::new(RwLock::new(IndexMap::new()))
}

pub enum Rejection {
    NotFound,
    Invalid(String),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::NotFound => StatusCode::NOT_FOUND.into_response(),
            Rejection::Invalid(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "error": reason })),
            )
                .into_response(),
        }
    }
}

fn command_routes() -> Router<Store> {
    Router::new()
        .route("/", post(create_person))
        .route("/{id}", patch(update_person).delete(delete_person))
}

fn query_routes() -> Router<Store> {
    Router::new()
        .route("/persons", get(list_persons))
        .route("/persons/{id}", get(get_person))
}

/// Write side only, for the split-host topology.
pub fn command_app(store: Store) -> Router {
    Router::new().nest(COMMAND_PREFIX, command_routes()).with_state(store)
}

/// Read side only, for the split-host topology.
pub fn query_app(store: Store) -> Router {
    Router::new().nest(QUERY_PREFIX, query_routes()).with_state(store)
}

/// Both sides behind one host.
pub fn gateway_app(store: Store) -> Router {
    Router::new()
        .nest(COMMAND_PREFIX, command_routes())
        .nest(QUERY_PREFIX, query_routes())
        .with_state(store)
}

pub fn app() -> Router {
    gateway_app(new_store())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve the command and query sides on separate listeners over one store.
pub async fn run_split(command: TcpListener, query: TcpListener) -> Result<(), std::io::Error> {
    let store = new_store();
    let command = axum::serve(command, command_app(store.clone()));
    let query = axum::serve(query, query_app(store));
    tokio::try_join!(command.into_future(), query.into_future())?;
    Ok(())
}

fn check_name(name: &str) -> Result<(), Rejection> {
    if name.trim().is_empty() {
        return Err(Rejection::Invalid("name is required".to_string()));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(Rejection::Invalid(format!("name exceeds {NAME_MAX_CHARS} characters")));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), Rejection> {
    if email.trim().is_empty() {
        return Err(Rejection::Invalid("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(Rejection::Invalid("email is malformed".to_string()));
    }
    if email.chars().count() > EMAIL_MAX_CHARS {
        return Err(Rejection::Invalid(format!("email exceeds {EMAIL_MAX_CHARS} characters")));
    }
    Ok(())
}

async fn list_persons(State(store): State<Store>) -> Json<Vec<Person>> {
    let persons = store.read().await;
    Json(persons.values().cloned().collect())
}

async fn get_person(State(store): State<Store>, Path(id): Path<String>) -> Result<Json<Person>, Rejection> {
    let persons = store.read().await;
    persons.get(&id).cloned().map(Json).ok_or(Rejection::NotFound)
}

async fn create_person(
    State(store): State<Store>,
    Json(input): Json<CreatePerson>,
) -> Result<(StatusCode, Json<Person>), Rejection> {
    check_name(&input.name)?;
    check_email(&input.email)?;
    let person = Person {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
    };
    store.write().await.insert(person.id.clone(), person.clone());
    log::info!("created person {}", person.id);
    Ok((StatusCode::CREATED, Json(person)))
}

async fn update_person(
    State(store): State<Store>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePerson>,
) -> Result<Json<Person>, Rejection> {
    let mut persons = store.write().await;
    let person = persons.get_mut(&id).ok_or(Rejection::NotFound)?;
    if let Some(name) = &input.name {
        check_name(name)?;
    }
    if let Some(email) = &input.email {
        check_email(email)?;
    }
    if let Some(name) = input.name {
        person.name = name;
    }
    if let Some(email) = input.email {
        person.email = email;
    }
    Ok(Json(person.clone()))
}

async fn delete_person(State(store): State<Store>, Path(id): Path<String>) -> Result<StatusCode, Rejection> {
    let mut persons = store.write().await;
    persons
        .shift_remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(Rejection::NotFound)
}
