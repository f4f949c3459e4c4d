//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use shoplist_api::{ApiConfig, ApiError, ApiService, BackendMode, Locale, RequestTracker, Ticket};

use crate::routing::Route;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current route - read
    pub route: ReadSignal<Route>,
    /// Current route - write
    set_route: WriteSignal<Route>,
    /// Backend in use, for the mock toggle
    pub mode: RwSignal<BackendMode>,
    service: StoredValue<ApiService>,
    config: StoredValue<ApiConfig>,
    /// Only the newest list load may write the store
    loads: StoredValue<RequestTracker>,
    /// Results from a replaced backend are dropped
    backends: StoredValue<RequestTracker>,
    session: StoredValue<Ticket>,
}

impl AppContext {
    pub fn new(config: ApiConfig, route: (ReadSignal<Route>, WriteSignal<Route>)) -> Self {
        let service = ApiService::from_config(&config);
        let backends = RequestTracker::new();
        let session = backends.begin();
        Self {
            route: route.0,
            set_route: route.1,
            mode: RwSignal::new(service.mode()),
            service: StoredValue::new(service),
            config: StoredValue::new(config),
            loads: StoredValue::new(RequestTracker::new()),
            backends: StoredValue::new(backends),
            session: StoredValue::new(session),
        }
    }

    pub fn service(&self) -> ApiService {
        self.service.get_value()
    }

    pub fn user(&self) -> String {
        self.service.with_value(|s| s.current_user().to_string())
    }

    pub fn locale(&self) -> Locale {
        self.service.with_value(|s| s.locale())
    }

    /// User-facing text for `err` in the service's locale
    pub fn describe(&self, err: &ApiError) -> &'static str {
        self.service.with_value(|s| s.describe(err))
    }

    /// Move to `route` and record it in the location hash
    pub fn navigate(&self, route: Route) {
        if let Err(err) = window().location().set_hash(&route.to_hash()) {
            log::warn!("could not update location hash: {err:?}");
        }
        self.set_route.set(route);
    }

    /// Sync the route signal after a `hashchange`
    pub fn sync_route(&self) {
        self.set_route.set(Route::current());
    }

    pub fn begin_load(&self) -> Ticket {
        self.loads.with_value(|t| t.begin())
    }

    /// Ticket tied to the current backend
    pub fn session(&self) -> Ticket {
        self.session.get_value()
    }

    /// Rebuild the service against the other backend. Pending loads go stale.
    pub fn switch_backend(&self, use_mocks: bool) {
        self.config.update_value(|c| c.use_mocks = use_mocks);
        let service = ApiService::from_config(&self.config.get_value());
        self.mode.set(service.mode());
        self.service.set_value(service);
        self.session.set_value(self.backends.with_value(|t| t.begin()));
        self.loads.with_value(|t| t.invalidate());
    }
}
