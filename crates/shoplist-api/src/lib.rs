//! Shopping-list data access
//!
//! Layered like the app itself:
//! - domain: lists, items, members and the rules for changing them
//! - repository: in-memory (mock) and HTTP backends
//! - service: the `ApiService` views call
//! - collection: optimistic client state with rollback

pub mod action;
pub mod collection;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod repository;
pub mod request;
pub mod service;
pub mod validation;

pub use action::{reconcile, Action, Outcome};
pub use collection::{visible_items, ListCollection, ListFilter, ListSummary, Undo};
pub use config::ApiConfig;
pub use domain::{Entity, Item, ItemId, ListId, ListPatch, Member, ShoppingList};
pub use error::{ApiError, ApiResult, ConflictReason, Denial, ErrorKind, Resource, ValidationError};
pub use messages::Locale;
pub use request::{RequestTracker, Ticket};
pub use service::{ApiService, BackendMode};
