//! Typed CRUD client core with local-view synchronization.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! collections of a demo REST API without touching the network
//! (host-does-IO pattern). A `ResourcePage` keeps an ordered `LocalView` of
//! one collection in step with the server by applying each acknowledged
//! mutation locally instead of re-fetching.
//!
//! # Design
//! - `ResourceClient` holds only configuration: base URL, default headers,
//!   and a monotonic clock for cache-busting timestamps and fallback ids.
//! - Each operation is split into `build_*` and `parse_*`; the `Transport`
//!   trait is the only I/O seam.
//! - Payloads are typed per collection through the `Resource` trait.
//! - Every failure is an `ApiError` naming the operation, the resource and
//!   (for per-record operations) the id.

pub mod client;
pub mod clock;
pub mod error;
pub mod http;
pub mod page;
pub mod resource;
pub mod state;
pub mod transport;
pub mod types;
pub mod view;

pub use client::ResourceClient;
pub use clock::{Clock, MonotonicClock, SystemClock};
pub use error::{ApiError, Cause};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use page::ResourcePage;
pub use resource::{Record, Resource};
pub use state::{OpState, Outcome};
pub use transport::{Transport, TransportError};
pub use types::{
    Comment, CommentAuthor, Comments, CreateComment, CreatePost, CreateProduct, CreateRecipe,
    CreateTodo, Post, Posts, Product, Products, Recipe, Recipes, Todo, Todos, UpdateComment,
    UpdatePost, UpdateProduct, UpdateRecipe, UpdateTodo,
};
pub use view::LocalView;
