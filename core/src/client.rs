//! Stateless HTTP request builder and response parser for collection
//! resources.
//!
//! # Design
//! `ResourceClient` holds a base URL, default headers and a clock. Each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`; `list`, `create`,
//! `update` and `delete` run the pair through a host-supplied `Transport`.
//! The resource type parameter selects the collection name and the payload
//! types, so a comment payload can never be posted to `products`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::clock::{Clock, MonotonicClock, SystemClock};
use crate::error::{ApiError, Cause};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resource::Resource;
use crate::transport::{Transport, TransportError};

const CONTENT_TYPE_JSON: (&str, &str) = ("content-type", "application/json");
const NO_CACHE: (&str, &str) = ("cache-control", "no-cache");

/// Typed accessor over the collections of one REST API.
///
/// Cloning is cheap; clones share the monotonic clock so ids synthesized by
/// any clone stay unique.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    base_url: String,
    default_headers: Vec<(String, String)>,
    clock: Arc<MonotonicClock<Box<dyn Clock>>>,
}

impl ResourceClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_clock(base_url, SystemClock)
    }

    pub fn with_clock(base_url: &str, clock: impl Clock + 'static) -> Self {
        let clock: Box<dyn Clock> = Box::new(clock);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: Vec::new(),
            clock: Arc::new(MonotonicClock::new(clock)),
        }
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        set_header(&mut self.default_headers, name, value);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    pub fn build_list<R: Resource>(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{}", self.base_url, R::NAME),
            headers: self.default_headers.clone(),
            body: None,
        }
    }

    /// The `timestamp` query parameter and `cache-control` header keep the
    /// demo API from replaying a memoized response for repeated creates.
    pub fn build_create<R: Resource>(&self, input: &R::Create) -> Result<HttpRequest, ApiError> {
        R::validate_create(input).map_err(validation::<R>)?;
        let body = encode(input).map_err(|cause| create_err::<R>(cause))?;
        let mut headers = self.json_headers();
        set_header(&mut headers, NO_CACHE.0, NO_CACHE.1);
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!(
                "{}/{}?timestamp={}",
                self.base_url,
                R::CREATE_PATH,
                self.clock.next()
            ),
            headers,
            body: Some(body),
        })
    }

    pub fn build_update<R: Resource>(
        &self,
        id: u64,
        input: &R::Update,
    ) -> Result<HttpRequest, ApiError> {
        R::validate_update(input).map_err(validation::<R>)?;
        let body = encode(input).map_err(|cause| update_err::<R>(id, cause))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/{}/{id}", self.base_url, R::NAME),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete<R: Resource>(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{}/{id}", self.base_url, R::NAME),
            headers: self.default_headers.clone(),
            body: None,
        }
    }

    // -----------------------------------------------------------------------
    // Parse
    // -----------------------------------------------------------------------

    /// Extracts the sequence stored under `R::NAME` in the wrapper object.
    pub fn parse_list<R: Resource>(&self, response: HttpResponse) -> Result<Vec<R::Record>, ApiError> {
        check_status(&response, HttpResponse::is_success).map_err(|cause| fetch_err::<R>(cause))?;
        let mut body: Value = serde_json::from_str(&response.body)
            .map_err(|e| fetch_err::<R>(Cause::Decode(e.to_string())))?;
        let items = body
            .get_mut(R::NAME)
            .map(Value::take)
            .ok_or_else(|| fetch_err::<R>(Cause::Decode(format!("missing `{}` key", R::NAME))))?;
        serde_json::from_value(items).map_err(|e| fetch_err::<R>(Cause::Decode(e.to_string())))
    }

    /// Accepts 200 or 201. A body without a usable `id` gets one synthesized
    /// from the clock instead of failing.
    pub fn parse_create<R: Resource>(&self, response: HttpResponse) -> Result<R::Record, ApiError> {
        check_status(&response, |r| matches!(r.status, 200 | 201))
            .map_err(|cause| create_err::<R>(cause))?;
        let mut body: Value = serde_json::from_str(&response.body)
            .map_err(|e| create_err::<R>(Cause::Decode(e.to_string())))?;
        let Some(fields) = body.as_object_mut() else {
            return Err(create_err::<R>(Cause::Decode(
                "expected a JSON object".to_string(),
            )));
        };
        if !has_usable_id(fields.get("id")) {
            let id = self.clock.next();
            tracing::warn!(
                resource = R::NAME,
                id,
                "create response did not include an id, using a synthesized one"
            );
            fields.insert("id".to_string(), Value::from(id));
        }
        serde_json::from_value(body).map_err(|e| create_err::<R>(Cause::Decode(e.to_string())))
    }

    /// Returns the record exactly as the server reports it.
    pub fn parse_update<R: Resource>(
        &self,
        id: u64,
        response: HttpResponse,
    ) -> Result<R::Record, ApiError> {
        check_status(&response, HttpResponse::is_success)
            .map_err(|cause| update_err::<R>(id, cause))?;
        serde_json::from_str(&response.body)
            .map_err(|e| update_err::<R>(id, Cause::Decode(e.to_string())))
    }

    /// Success is the absence of an error; the body is ignored.
    pub fn parse_delete<R: Resource>(&self, id: u64, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, HttpResponse::is_success)
            .map_err(|cause| delete_err::<R>(id, cause))
    }

    // -----------------------------------------------------------------------
    // Round trips
    // -----------------------------------------------------------------------

    pub fn list<R: Resource>(&self, transport: &impl Transport) -> Result<Vec<R::Record>, ApiError> {
        let response = send(transport, self.build_list::<R>())
            .map_err(|e| fetch_err::<R>(transport_cause(e)))?;
        self.parse_list::<R>(response)
    }

    pub fn create<R: Resource>(
        &self,
        transport: &impl Transport,
        input: &R::Create,
    ) -> Result<R::Record, ApiError> {
        let request = self.build_create::<R>(input)?;
        let response =
            send(transport, request).map_err(|e| create_err::<R>(transport_cause(e)))?;
        self.parse_create::<R>(response)
    }

    pub fn update<R: Resource>(
        &self,
        transport: &impl Transport,
        id: u64,
        input: &R::Update,
    ) -> Result<R::Record, ApiError> {
        let request = self.build_update::<R>(id, input)?;
        let response =
            send(transport, request).map_err(|e| update_err::<R>(id, transport_cause(e)))?;
        self.parse_update::<R>(id, response)
    }

    pub fn delete<R: Resource>(&self, transport: &impl Transport, id: u64) -> Result<(), ApiError> {
        let response = send(transport, self.build_delete::<R>(id))
            .map_err(|e| delete_err::<R>(id, transport_cause(e)))?;
        self.parse_delete::<R>(id, response)
    }

    fn json_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.default_headers.clone();
        set_header(&mut headers, CONTENT_TYPE_JSON.0, CONTENT_TYPE_JSON.1);
        headers
    }
}

/// Runs one request through `transport`. Every round trip, whether driven by
/// the client or by a page, goes through here so they log alike.
pub(crate) fn send(
    transport: &impl Transport,
    request: HttpRequest,
) -> Result<HttpResponse, TransportError> {
    tracing::debug!(method = %request.method, path = %request.path, "sending request");
    let response = transport.execute(request).inspect_err(|e| {
        tracing::debug!(error = %e, "transport failed");
    })?;
    tracing::debug!(status = response.status, "received response");
    Ok(response)
}

pub(crate) fn transport_cause(err: TransportError) -> Cause {
    Cause::Transport(err.to_string())
}

/// Sets `name` to `value`, replacing any earlier value under a
/// case-insensitive match of the name.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    let name = name.to_ascii_lowercase();
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
        Some(slot) => *slot = (name, value.to_string()),
        None => headers.push((name, value.to_string())),
    }
}

fn encode(input: &impl Serialize) -> Result<String, Cause> {
    serde_json::to_string(input).map_err(|e| Cause::Encode(e.to_string()))
}

/// Map a status outside `accept` to the appropriate `Cause`.
fn check_status(response: &HttpResponse, accept: impl Fn(&HttpResponse) -> bool) -> Result<(), Cause> {
    if accept(response) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(Cause::NotFound);
    }
    Err(Cause::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

/// A missing key, `null`, `0`, `""` and `false` all count as "no id".
fn has_usable_id(id: Option<&Value>) -> bool {
    match id {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_u64() != Some(0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

pub(crate) fn fetch_err<R: Resource>(cause: Cause) -> ApiError {
    ApiError::Fetch {
        resource: R::NAME.to_string(),
        cause,
    }
}

pub(crate) fn create_err<R: Resource>(cause: Cause) -> ApiError {
    ApiError::Create {
        resource: R::NAME.to_string(),
        cause,
    }
}

pub(crate) fn update_err<R: Resource>(id: u64, cause: Cause) -> ApiError {
    ApiError::Update {
        resource: R::NAME.to_string(),
        id,
        cause,
    }
}

pub(crate) fn delete_err<R: Resource>(id: u64, cause: Cause) -> ApiError {
    ApiError::Delete {
        resource: R::NAME.to_string(),
        id,
        cause,
    }
}

pub(crate) fn validation<R: Resource>(reason: String) -> ApiError {
    ApiError::Validation {
        resource: R::NAME.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::transport::TransportError;
    use crate::types::{Comments, CreateComment, Products, Todos, UpdateComment, UpdateTodo};

    #[derive(Debug)]
    struct Frozen(u64);

    impl Clock for Frozen {
        fn now_millis(&self) -> u64 {
            self.0
        }
    }

    const NOW: u64 = 1_700_000_000_000;

    fn client() -> ResourceClient {
        ResourceClient::with_clock("http://localhost:3000", Frozen(NOW))
    }

    fn comment_input() -> CreateComment {
        CreateComment {
            body: "hi".to_string(),
            post_id: 1,
            user_id: 1,
        }
    }

    /// Replays one canned response and records the request it was given.
    struct Canned {
        response: Result<HttpResponse, TransportError>,
        seen: RefCell<Option<HttpRequest>>,
    }

    impl Canned {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse::new(status, body)),
                seen: RefCell::new(None),
            }
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            *self.seen.borrow_mut() = Some(request);
            self.response.clone()
        }
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list::<Comments>();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/comments");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_adds_cache_busting() {
        let req = client().build_create::<Comments>(&comment_input()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.path,
            format!("http://localhost:3000/comments/add?timestamp={NOW}")
        );
        assert_eq!(req.header("Cache-Control"), Some("no-cache"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["body"], "hi");
        assert_eq!(body["postId"], 1);
        assert_eq!(body["userId"], 1);
    }

    #[test]
    fn repeated_creates_use_distinct_timestamps() {
        let c = client();
        let a = c.build_create::<Comments>(&comment_input()).unwrap();
        let b = c.build_create::<Comments>(&comment_input()).unwrap();
        assert_ne!(a.path, b.path);
    }

    #[test]
    fn build_create_rejects_blank_body() {
        let input = CreateComment {
            body: "  ".to_string(),
            ..comment_input()
        };
        let err = client().build_create::<Comments>(&input).unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref resource, .. } if resource == "comments"));
    }

    #[test]
    fn build_update_targets_record_address() {
        let input = UpdateTodo {
            todo: None,
            completed: Some(true),
        };
        let req = client().build_update::<Todos>(5, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/todos/5");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"completed": true}));
    }

    #[test]
    fn build_delete_targets_record_address() {
        let req = client().build_delete::<Products>(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/products/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn default_headers_go_on_every_request() {
        let c = client().with_header("X-Demo", "1");
        assert_eq!(c.build_list::<Comments>().header("x-demo"), Some("1"));
        assert_eq!(c.build_delete::<Comments>(1).header("x-demo"), Some("1"));
        let req = c.build_create::<Comments>(&comment_input()).unwrap();
        assert_eq!(req.header("x-demo"), Some("1"));
    }

    #[test]
    fn create_overrides_default_cache_control() {
        let c = client()
            .with_header("Cache-Control", "max-age=60")
            .with_header("Content-Type", "text/plain");
        let req = c.build_create::<Comments>(&comment_input()).unwrap();
        assert_eq!(req.header("cache-control"), Some("no-cache"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        let count = |name: &str| req.headers.iter().filter(|(k, _)| k == name).count();
        assert_eq!(count("cache-control"), 1);
        assert_eq!(count("content-type"), 1);

        // Requests without a body keep the configured value.
        let list = c.build_list::<Comments>();
        assert_eq!(list.header("cache-control"), Some("max-age=60"));
    }

    #[test]
    fn repeated_default_header_keeps_last_value() {
        let c = client().with_header("X-Demo", "1").with_header("x-demo", "2");
        let req = c.build_list::<Comments>();
        assert_eq!(req.headers, vec![("x-demo".to_string(), "2".to_string())]);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let c = ResourceClient::new("http://localhost:3000/");
        assert_eq!(c.build_list::<Todos>().path, "http://localhost:3000/todos");
    }

    #[test]
    fn parse_list_preserves_order() {
        let response = HttpResponse::new(
            200,
            r#"{"comments":[{"id":3,"body":"c","postId":1},{"id":1,"body":"a","postId":1},{"id":2,"body":"b","postId":2}],"total":3,"skip":0,"limit":3}"#,
        );
        let comments = client().parse_list::<Comments>(response).unwrap();
        let ids: Vec<u64> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn parse_list_requires_resource_key() {
        let response = HttpResponse::new(200, r#"{"posts":[]}"#);
        let err = client().parse_list::<Comments>(response).unwrap_err();
        assert!(matches!(err, ApiError::Fetch { cause: Cause::Decode(_), .. }));
    }

    #[test]
    fn parse_list_failure_status() {
        let response = HttpResponse::new(503, "unavailable");
        let err = client().parse_list::<Comments>(response).unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(matches!(err, ApiError::Fetch { .. }));
    }

    #[test]
    fn parse_create_keeps_server_id() {
        let response = HttpResponse::new(201, r#"{"id":101,"body":"hi","postId":1}"#);
        let comment = client().parse_create::<Comments>(response).unwrap();
        assert_eq!(comment.id, 101);
        assert_eq!(comment.body, "hi");
    }

    #[test]
    fn parse_create_accepts_200() {
        let response = HttpResponse::new(200, r#"{"id":7,"todo":"x","completed":false,"userId":1}"#);
        let todo = client().parse_create::<Todos>(response).unwrap();
        assert_eq!(todo.id, 7);
    }

    #[test]
    fn parse_create_rejects_other_2xx() {
        let response = HttpResponse::new(202, r#"{"id":7}"#);
        let err = client().parse_create::<Comments>(response).unwrap_err();
        assert!(matches!(err, ApiError::Create { cause: Cause::Status { status: 202, .. }, .. }));
    }

    #[test]
    fn parse_create_synthesizes_missing_id() {
        let c = client();
        let first = c
            .parse_create::<Comments>(HttpResponse::new(201, r#"{"body":"hi","postId":1}"#))
            .unwrap();
        let second = c
            .parse_create::<Comments>(HttpResponse::new(201, r#"{"id":null,"body":"yo","postId":1}"#))
            .unwrap();
        assert!(first.id >= NOW);
        assert!(second.id > first.id);
        assert_eq!(first.body, "hi");
    }

    #[test]
    fn parse_create_treats_falsy_ids_as_missing() {
        let c = client();
        let mut seen = Vec::new();
        for body in [
            r#"{"id":0,"body":"hi"}"#,
            r#"{"id":"","body":"hi"}"#,
            r#"{"id":false,"body":"hi"}"#,
        ] {
            let comment = c
                .parse_create::<Comments>(HttpResponse::new(201, body))
                .unwrap();
            assert!(comment.id >= NOW, "{body}");
            assert_eq!(comment.body, "hi");
            seen.push(comment.id);
        }
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parse_create_non_numeric_id_is_decode_error() {
        let err = client()
            .parse_create::<Comments>(HttpResponse::new(201, r#"{"id":"abc","body":"hi"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Create { cause: Cause::Decode(_), .. }));
    }

    #[test]
    fn parse_create_rejects_non_object() {
        let err = client()
            .parse_create::<Comments>(HttpResponse::new(201, "[1,2]"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Create { cause: Cause::Decode(_), .. }));
    }

    #[test]
    fn parse_update_returns_server_record() {
        let response = HttpResponse::new(200, r#"{"id":4,"body":"edited","postId":9,"likes":2}"#);
        let comment = client().parse_update::<Comments>(4, response).unwrap();
        assert_eq!(comment.body, "edited");
        assert_eq!(comment.post_id, 9);
    }

    #[test]
    fn parse_update_not_found_keeps_id() {
        let err = client()
            .parse_update::<Comments>(999, HttpResponse::new(404, ""))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Update {
                resource: "comments".to_string(),
                id: 999,
                cause: Cause::NotFound
            }
        );
    }

    #[test]
    fn parse_delete_ignores_body() {
        let response = HttpResponse::new(200, r#"{"id":1,"isDeleted":true}"#);
        assert!(client().parse_delete::<Comments>(1, response).is_ok());
        assert!(client().parse_delete::<Comments>(1, HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_failure() {
        let err = client()
            .parse_delete::<Comments>(1, HttpResponse::new(500, "nope"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Delete { id: 1, .. }));
    }

    #[test]
    fn round_trip_goes_through_transport() {
        let transport = Canned::new(200, r#"{"id":4,"body":"new"}"#);
        let input = UpdateComment {
            body: Some("new".to_string()),
        };
        let comment = client().update::<Comments>(&transport, 4, &input).unwrap();
        assert_eq!(comment.body, "new");
        let seen = transport.seen.borrow().clone().unwrap();
        assert_eq!(seen.path, "http://localhost:3000/comments/4");
    }

    #[test]
    fn transport_failure_becomes_typed_error() {
        let transport = Canned {
            response: Err(TransportError::new("connection refused")),
            seen: RefCell::new(None),
        };
        let err = client().list::<Comments>(&transport).unwrap_err();
        assert_eq!(
            err,
            ApiError::Fetch {
                resource: "comments".to_string(),
                cause: Cause::Transport("connection refused".to_string())
            }
        );
    }

    #[test]
    fn validation_failure_skips_transport() {
        let transport = Canned::new(201, r#"{"id":1}"#);
        let input = CreateComment {
            body: String::new(),
            ..comment_input()
        };
        assert!(client().create::<Comments>(&transport, &input).is_err());
        assert!(transport.seen.borrow().is_none());
    }
}
