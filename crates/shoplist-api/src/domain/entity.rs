//! Domain Layer - Core Entity Trait
//!
//! All entities carry a unique identifier the repositories look them up by.

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Position of the entity with the given id in a slice
pub(crate) fn position_of<T: Entity>(entities: &[T], id: &T::Id) -> Option<usize> {
    entities.iter().position(|e| &e.id() == id)
}
