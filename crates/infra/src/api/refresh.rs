//! Single-flight credential refresh
//!
//! Concurrent requests that hit 401 while a refresh is underway await the
//! same shared future instead of issuing their own refresh call. The slot is
//! emptied once the refresh settles, so a later expiry starts a new one.
//!
//! ```text
//! request A ──401──► run ──► slot empty ──► start refresh ──┐
//! request B ──401──► run ──► slot busy  ──► join ───────────┤──► outcome
//!                                                           │
//!                     settled ──► slot cleared ◄────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use blogc_common::auth::SessionStore;
use blogc_domain::RefreshResponse;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::http::HttpClient;

/// Why a refresh did not produce a new access credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshFailure {
    #[error("no refresh credential stored")]
    NoRefreshToken,

    #[error("refresh endpoint returned status {0}")]
    Rejected(StatusCode),

    #[error("refresh request failed: {0}")]
    Transport(String),

    #[error("refresh response malformed: {0}")]
    Malformed(String),

    #[error("credential store error: {0}")]
    Store(String),
}

impl RefreshFailure {
    /// Every failure except a missing refresh credential tears the session
    /// down.
    #[must_use]
    pub fn clears_session(&self) -> bool {
        !matches!(self, Self::NoRefreshToken)
    }
}

/// New access credential on success.
pub type RefreshOutcome = Result<String, RefreshFailure>;

struct InFlight {
    id: u64,
    future: Shared<BoxFuture<'static, RefreshOutcome>>,
}

/// Deduplicates concurrent refreshes.
pub(crate) struct RefreshCoordinator {
    slot: Mutex<Option<InFlight>>,
    next_id: AtomicU64,
}

impl RefreshCoordinator {
    pub(crate) fn new() -> Self {
        Self { slot: Mutex::new(None), next_id: AtomicU64::new(0) }
    }

    /// Join the in-progress refresh or start one.
    ///
    /// `already_rotated` runs under the slot lock when no refresh is in
    /// flight. Returning `Some(token)` means another request finished a
    /// refresh after this caller's credential went stale, and that token is
    /// used without a new refresh.
    pub(crate) async fn run<C, S>(&self, already_rotated: C, start: S) -> RefreshOutcome
    where
        C: FnOnce() -> Option<String>,
        S: FnOnce() -> BoxFuture<'static, RefreshOutcome>,
    {
        let (id, future) = {
            let mut slot = self.slot.lock();
            match slot.as_ref() {
                Some(in_flight) => {
                    debug!(refresh_id = in_flight.id, "Joining in-flight credential refresh");
                    (in_flight.id, in_flight.future.clone())
                }
                None => {
                    if let Some(current) = already_rotated() {
                        debug!("Credential rotated by a concurrent request; skipping refresh");
                        return Ok(current);
                    }

                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let future = start().shared();
                    *slot = Some(InFlight { id, future: future.clone() });
                    (id, future)
                }
            }
        };

        let outcome = future.await;

        let mut slot = self.slot.lock();
        if slot.as_ref().is_some_and(|in_flight| in_flight.id == id) {
            *slot = None;
        }

        outcome
    }

    #[cfg(test)]
    fn is_idle(&self) -> bool {
        self.slot.lock().is_none()
    }
}

/// Performs the refresh exchange against the token endpoint.
#[derive(Clone, Debug)]
pub(crate) struct RefreshExchange {
    pub(crate) http: HttpClient,
    pub(crate) endpoint: Url,
    pub(crate) session: SessionStore,
}

impl RefreshExchange {
    /// Exchange the stored refresh credential for a new access credential
    /// and persist the result. Failures other than a missing refresh
    /// credential clear the session.
    pub(crate) async fn exchange(self) -> RefreshOutcome {
        let refresh = match self.session.refresh_token() {
            Ok(Some(refresh)) => refresh,
            Ok(None) => {
                info!("No refresh credential stored; skipping refresh");
                return Err(RefreshFailure::NoRefreshToken);
            }
            Err(err) => return self.fail(RefreshFailure::Store(err.to_string())),
        };

        info!(endpoint = %self.endpoint, "Refreshing access credential");

        let request = self
            .http
            .request(Method::POST, self.endpoint.clone())
            .json(&serde_json::json!({ "refresh": refresh }));

        let response = match self.http.send(request).await {
            Ok(response) => response,
            Err(err) => return self.fail(RefreshFailure::Transport(err.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            return self.fail(RefreshFailure::Rejected(status));
        }

        let body: RefreshResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => return self.fail(RefreshFailure::Malformed(err.to_string())),
        };

        if body.access.is_empty() {
            return self.fail(RefreshFailure::Malformed("empty access credential".into()));
        }

        if let Err(err) = self.session.rotate(&body.access, body.refresh.as_deref()) {
            return self.fail(RefreshFailure::Store(err.to_string()));
        }

        info!(refresh_rotated = body.refresh.is_some(), "Access credential refreshed");
        Ok(body.access)
    }

    fn fail(&self, failure: RefreshFailure) -> RefreshOutcome {
        warn!(error = %failure, "Credential refresh failed; clearing session");
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "Failed to clear session after refresh failure");
        }
        Err(failure)
    }
}
