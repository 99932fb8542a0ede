//! In-memory stand-in for the demo REST API.
//!
//! Serves any collection name: `GET /{resource}` returns the records wrapped
//! under the collection key, `POST /{resource}/add` assigns the next id,
//! `PUT /{resource}/{id}` merges the payload over the stored record and
//! `DELETE /{resource}/{id}` answers with the removed record flagged
//! `isDeleted`. Records are kept as raw JSON objects.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// One collection: records in display order plus the next id to hand out.
#[derive(Debug, Default)]
pub struct Collection {
    pub records: Vec<Map<String, Value>>,
    pub next_id: u64,
}

/// Behaviour switches for exercising client edge cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockOptions {
    /// Strip `id` from create responses, like the real API sometimes does.
    pub omit_create_id: bool,
}

#[derive(Debug, Default)]
pub struct Store {
    pub collections: HashMap<String, Collection>,
    pub options: MockOptions,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(seeded_store(MockOptions::default()))
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/{resource}", get(list_records))
        .route("/{resource}/add", post(create_record))
        .route("/{resource}/{id}", put(update_record).delete(delete_record))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

/// A store pre-filled with a few records per demo collection.
pub fn seeded_store(options: MockOptions) -> Store {
    let seeds: [(&str, Value); 5] = [
        (
            "comments",
            json!([
                {"id": 1, "body": "This is some awesome thinking!", "postId": 242, "likes": 3,
                 "user": {"id": 105, "username": "emmac", "fullName": "Emma Wilson"}},
                {"id": 2, "body": "What terrific math skills you're showing!", "postId": 46, "likes": 4,
                 "user": {"id": 183, "username": "cameronp", "fullName": "Cameron Perez"}}
            ]),
        ),
        (
            "products",
            json!([
                {"id": 1, "title": "Essence Mascara Lash Princess", "description": "Volumizing mascara",
                 "price": 9.99, "category": "beauty", "stock": 5}
            ]),
        ),
        (
            "recipes",
            json!([
                {"id": 1, "name": "Classic Margherita Pizza",
                 "ingredients": ["Pizza dough", "Tomato sauce", "Fresh mozzarella"],
                 "instructions": ["Preheat the oven", "Bake"], "cuisine": "Italian", "difficulty": "Easy"}
            ]),
        ),
        (
            "posts",
            json!([
                {"id": 1, "title": "His mother had always taught him", "body": "His mother had always taught him not to ever think of himself as better than others.",
                 "userId": 121, "tags": ["history", "american"]}
            ]),
        ),
        (
            "todos",
            json!([
                {"id": 1, "todo": "Do something nice for someone you care about", "completed": false, "userId": 152},
                {"id": 2, "todo": "Memorize a poem", "completed": true, "userId": 13}
            ]),
        ),
    ];

    let mut store = Store {
        collections: HashMap::new(),
        options,
    };
    for (name, records) in seeds {
        let records: Vec<Map<String, Value>> = match records {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let next_id = records.iter().filter_map(record_id).max().unwrap_or(0) + 1;
        store
            .collections
            .insert(name.to_string(), Collection { records, next_id });
    }
    store
}

fn record_id(record: &Map<String, Value>) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}

#[derive(Deserialize)]
struct RecordPath {
    resource: String,
    id: u64,
}

async fn list_records(State(db): State<Db>, Path(resource): Path<String>) -> Json<Value> {
    let store = db.read().await;
    let records: Vec<Value> = store
        .collections
        .get(&resource)
        .map(|c| c.records.iter().cloned().map(Value::Object).collect())
        .unwrap_or_default();
    let total = records.len();
    let mut body = Map::new();
    body.insert(resource, Value::Array(records));
    body.insert("total".to_string(), json!(total));
    body.insert("skip".to_string(), json!(0));
    body.insert("limit".to_string(), json!(total));
    Json(Value::Object(body))
}

async fn create_record(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Json(input): Json<Map<String, Value>>,
) -> (StatusCode, Json<Value>) {
    let mut store = db.write().await;
    let omit_id = store.options.omit_create_id;
    let collection = store.collections.entry(resource).or_default();
    let id = collection.next_id.max(1);
    collection.next_id = id + 1;

    let mut record = input;
    record.insert("id".to_string(), json!(id));
    collection.records.insert(0, record.clone());

    tracing::debug!(id, omit_id, "created record");
    if omit_id {
        record.remove("id");
    }
    (StatusCode::CREATED, Json(Value::Object(record)))
}

async fn update_record(
    State(db): State<Db>,
    Path(RecordPath { resource, id }): Path<RecordPath>,
    Json(input): Json<Map<String, Value>>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    let record = store
        .collections
        .get_mut(&resource)
        .and_then(|c| c.records.iter_mut().find(|r| record_id(r) == Some(id)))
        .ok_or(StatusCode::NOT_FOUND)?;
    for (key, value) in input {
        if key != "id" {
            record.insert(key, value);
        }
    }
    Ok(Json(Value::Object(record.clone())))
}

async fn delete_record(
    State(db): State<Db>,
    Path(RecordPath { resource, id }): Path<RecordPath>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    let collection = store
        .collections
        .get_mut(&resource)
        .ok_or(StatusCode::NOT_FOUND)?;
    let pos = collection
        .records
        .iter()
        .position(|r| record_id(r) == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    let mut record = collection.records.remove(pos);
    tracing::debug!(%resource, id, "deleted record");
    record.insert("isDeleted".to_string(), json!(true));
    record.insert("deletedOn".to_string(), json!(deleted_on()));
    Ok(Json(Value::Object(record)))
}

/// Milliseconds since the epoch, rendered as a string.
fn deleted_on() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().to_string())
        .unwrap_or_default()
}
