//! Hash Routing
//!
//! Two routes: the overview at `#/` and a list detail at `#/list/{id}`.

use leptos::prelude::window;
use shoplist_api::ListId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Overview,
    Detail(ListId),
}

impl Route {
    /// Anything unrecognised lands on the overview
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["list", id] => id.parse().map(Route::Detail).unwrap_or(Route::Overview),
            _ => Route::Overview,
        }
    }

    pub fn to_hash(self) -> String {
        match self {
            Route::Overview => "#/".to_string(),
            Route::Detail(id) => format!("#/list/{id}"),
        }
    }

    /// Route for the browser's current location
    pub fn current() -> Self {
        let hash = window().location().hash().unwrap_or_default();
        Self::from_hash(&hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::from_hash(""), Route::Overview);
        assert_eq!(Route::from_hash("#/"), Route::Overview);
        assert_eq!(Route::from_hash("#/list/3"), Route::Detail(3));
        assert_eq!(Route::from_hash("#/list/3/"), Route::Detail(3));
        assert_eq!(Route::from_hash("#list/42"), Route::Detail(42));
    }

    #[test]
    fn test_unknown_routes_fall_back() {
        assert_eq!(Route::from_hash("#/list/abc"), Route::Overview);
        assert_eq!(Route::from_hash("#/list"), Route::Overview);
        assert_eq!(Route::from_hash("#/settings"), Route::Overview);
        assert_eq!(Route::from_hash("#/list/1/items"), Route::Overview);
    }

    #[test]
    fn test_hash_round_trip() {
        for route in [Route::Overview, Route::Detail(999999)] {
            assert_eq!(Route::from_hash(&route.to_hash()), route);
        }
    }
}
