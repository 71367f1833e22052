//! Sidebar greeting and the route guard

use std::sync::Arc;

use super::Route;
use crate::client::TaskApi;
use crate::session::SessionStore;

/// Greeting used when no name is known
pub const DEFAULT_GREETING: &str = "User";

pub struct Navigation {
    api: Arc<dyn TaskApi>,
    session: SessionStore,
}

impl Navigation {
    pub fn new(api: Arc<dyn TaskApi>, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// First name of the signed-in user.
    ///
    /// A cached user without a name triggers one profile fetch; no cached
    /// user, or a failed fetch, yields [`DEFAULT_GREETING`].
    pub async fn greeting(&self) -> String {
        let Some(user) = self.session.user() else {
            return DEFAULT_GREETING.to_string();
        };

        if let Some(first) = user.first_name() {
            return first.to_string();
        }

        match self.api.get_profile().await {
            Ok(profile) => profile
                .first_name()
                .unwrap_or(DEFAULT_GREETING)
                .to_string(),
            Err(e) => {
                tracing::debug!(error = %e, "Profile lookup for greeting failed");
                DEFAULT_GREETING.to_string()
            }
        }
    }

    /// Screen actually shown when `requested` is asked for
    pub fn resolve(&self, requested: Route) -> Route {
        guard(requested, self.session.is_authenticated())
    }
}

/// Anonymous users only reach the public screens; signed-in users skip them
pub fn guard(requested: Route, authenticated: bool) -> Route {
    match (authenticated, requested.is_public()) {
        (false, true) | (true, false) => requested,
        (false, false) => Route::Login,
        (true, true) => Route::Dashboard,
    }
}
