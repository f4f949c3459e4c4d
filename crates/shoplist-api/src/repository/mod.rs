//! Repository Layer
//!
//! Backends behind the data service: an injectable in-memory store (mock mode)
//! and a REST client (remote mode).

mod traits;
mod memory;
mod http;
pub mod fixtures;


pub use traits::ShoppingListRepository;
pub use memory::InMemoryRepository;
pub use http::HttpRepository;
