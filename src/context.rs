//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::HttpTransport;
use crate::config::ApiConfig;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The single HTTP client every screen talks through
    transport: StoredValue<HttpTransport, LocalStorage>,
}

impl AppContext {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            transport: StoredValue::new_local(HttpTransport::new(config)),
        }
    }

    /// Handle to the shared client (clones share the connection pool)
    pub fn transport(&self) -> HttpTransport {
        self.transport.get_value()
    }
}

/// Get the app context; panics outside `App`
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
