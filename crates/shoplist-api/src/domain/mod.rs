//! Domain Layer
//!
//! Shopping lists, their items and members, plus the rules every backend
//! (and the optimistic client state) applies when mutating them.

mod entity;
mod item;
mod member;
mod shopping_list;

pub use entity::Entity;
pub use item::{Item, ItemId};
pub use member::Member;
pub use shopping_list::{ListId, ListPatch, ShoppingList};
