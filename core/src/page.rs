//! Page controller that keeps a `LocalView` in step with one collection.
//!
//! # Design
//! Each operation is split like the client: `start_*` marks the page
//! in flight and returns the request to execute, `finish_*` takes the
//! host's result, applies the local mutation on success and settles the
//! state. Every `finish_*` path, and every `start_*` that fails before a
//! request exists, leaves the state at `Succeeded` or `Failed`, so
//! `is_loading` cannot stay `true` once an operation has returned.
//!
//! `mount`, `add`, `edit` and `remove` run both halves through a
//! `Transport` for hosts that block on the round trip. Async hosts call the
//! halves themselves and may have several requests in flight at once; their
//! results are applied in completion order without deduplication.
//!
//! Failures are logged and also kept in `last_error` for display.

use std::marker::PhantomData;

use crate::client::{
    create_err, delete_err, fetch_err, send, transport_cause, update_err, ResourceClient,
};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::resource::Resource;
use crate::state::{OpState, Outcome};
use crate::transport::{Transport, TransportError};
use crate::view::LocalView;

#[derive(Debug)]
pub struct ResourcePage<R: Resource> {
    client: ResourceClient,
    view: LocalView<R::Record>,
    state: OpState<Outcome<R::Record>>,
    last_error: Option<ApiError>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourcePage<R> {
    pub fn new(client: ResourceClient) -> Self {
        Self {
            client,
            view: LocalView::new(),
            state: OpState::Idle,
            last_error: None,
            _resource: PhantomData,
        }
    }

    pub fn view(&self) -> &LocalView<R::Record> {
        &self.view
    }

    pub fn state(&self) -> &OpState<Outcome<R::Record>> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Most recent failure, cleared by the next successful operation.
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    // -----------------------------------------------------------------------
    // Blocking round trips
    // -----------------------------------------------------------------------

    /// Loads the collection, replacing whatever the view held.
    pub fn mount(&mut self, transport: &impl Transport) -> Result<usize, ApiError> {
        let request = self.start_list();
        let response = send(transport, request);
        self.finish_list(response)
    }

    /// Creates a record and puts it at the front of the view.
    pub fn add(&mut self, transport: &impl Transport, input: &R::Create) -> Result<R::Record, ApiError> {
        let request = self.start_create(input)?;
        let response = send(transport, request);
        self.finish_create(response)
    }

    /// Updates a record and swaps the server's copy in at the same position.
    pub fn edit(
        &mut self,
        transport: &impl Transport,
        id: u64,
        input: &R::Update,
    ) -> Result<R::Record, ApiError> {
        let request = self.start_update(id, input)?;
        let response = send(transport, request);
        self.finish_update(id, response)
    }

    /// Deletes a record and filters it out of the view.
    pub fn remove(&mut self, transport: &impl Transport, id: u64) -> Result<(), ApiError> {
        let request = self.start_delete(id);
        let response = send(transport, request);
        self.finish_delete(id, response)
    }

    // -----------------------------------------------------------------------
    // Split halves
    // -----------------------------------------------------------------------

    pub fn start_list(&mut self) -> HttpRequest {
        self.state = OpState::InFlight;
        self.client.build_list::<R>()
    }

    pub fn finish_list(
        &mut self,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<usize, ApiError> {
        let result = response
            .map_err(|e| fetch_err::<R>(transport_cause(e)))
            .and_then(|r| self.client.parse_list::<R>(r))
            .map(|records| {
                let count = records.len();
                self.view.replace_all(records);
                count
            });
        self.settle(result, Outcome::Listed)
    }

    pub fn start_create(&mut self, input: &R::Create) -> Result<HttpRequest, ApiError> {
        self.state = OpState::InFlight;
        let built = self.client.build_create::<R>(input);
        self.settle_start(built)
    }

    pub fn finish_create(
        &mut self,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<R::Record, ApiError> {
        let result = response
            .map_err(|e| create_err::<R>(transport_cause(e)))
            .and_then(|r| self.client.parse_create::<R>(r))
            .map(|record| {
                self.view.prepend(record.clone());
                record
            });
        self.settle(result, Outcome::Created)
    }

    pub fn start_update(&mut self, id: u64, input: &R::Update) -> Result<HttpRequest, ApiError> {
        self.state = OpState::InFlight;
        let built = self.client.build_update::<R>(id, input);
        self.settle_start(built)
    }

    pub fn finish_update(
        &mut self,
        id: u64,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<R::Record, ApiError> {
        let result = response
            .map_err(|e| update_err::<R>(id, transport_cause(e)))
            .and_then(|r| self.client.parse_update::<R>(id, r))
            .map(|record| {
                if !self.view.replace(id, record.clone()) {
                    tracing::debug!(resource = R::NAME, id, "updated record is not in the local view");
                }
                record
            });
        self.settle(result, Outcome::Updated)
    }

    pub fn start_delete(&mut self, id: u64) -> HttpRequest {
        self.state = OpState::InFlight;
        self.client.build_delete::<R>(id)
    }

    pub fn finish_delete(
        &mut self,
        id: u64,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<(), ApiError> {
        let result = response
            .map_err(|e| delete_err::<R>(id, transport_cause(e)))
            .and_then(|r| self.client.parse_delete::<R>(id, r))
            .map(|()| {
                self.view.remove(id);
            });
        self.settle(result, |()| Outcome::Deleted(id))
    }

    fn settle_start(&mut self, built: Result<HttpRequest, ApiError>) -> Result<HttpRequest, ApiError> {
        match built {
            Ok(request) => Ok(request),
            Err(err) => Err(self.fail(err)),
        }
    }

    fn settle<T: Clone>(
        &mut self,
        result: Result<T, ApiError>,
        outcome: impl FnOnce(T) -> Outcome<R::Record>,
    ) -> Result<T, ApiError> {
        match result {
            Ok(value) => {
                self.state = OpState::Succeeded(outcome(value.clone()));
                self.last_error = None;
                Ok(value)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: ApiError) -> ApiError {
        tracing::error!(resource = R::NAME, error = %err, "page operation failed");
        self.state = OpState::Failed(err.clone());
        self.last_error = Some(err.clone());
        err
    }
}
