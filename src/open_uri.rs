//! Links the app was opened with.
//!
//! A link can arrive before there is an active user (e.g. during onboarding).
//! It is kept until a user becomes active and then planned like a pasted one.

use log::{debug, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::error::PlanError;
use crate::plan::{ConnectionPlan, ConnectionPlanner};

pub type PlanHandle = JoinHandle<Result<ConnectionPlan, PlanError>>;

#[derive(Debug)]
pub enum OpenUriOutcome {
    /// Stored until a user is active.
    Deferred,
    Planning(PlanHandle),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUri {
    pub host_id: Option<i64>,
    pub uri: String,
}

pub struct OpenUriHandler {
    planner: Arc<dyn ConnectionPlanner>,
    has_active_user: bool,
    pending: Option<PendingUri>,
}

impl OpenUriHandler {
    pub fn new(planner: Arc<dyn ConnectionPlanner>, has_active_user: bool) -> Self {
        Self {
            planner,
            has_active_user,
            pending: None,
        }
    }

    pub fn pending_uri(&self) -> Option<&PendingUri> {
        self.pending.as_ref()
    }

    pub fn connect_if_opened_via_uri(&mut self, host_id: Option<i64>, uri: &str) -> OpenUriOutcome {
        info!("opened via link");
        let pending = PendingUri {
            host_id,
            uri: uri.to_string(),
        };

        if !self.has_active_user {
            debug!("no active user yet, deferring link");
            self.pending = Some(pending);
            return OpenUriOutcome::Deferred;
        }

        match self.spawn_plan(&pending) {
            Some(handle) => OpenUriOutcome::Planning(handle),
            None => {
                self.pending = Some(pending);
                OpenUriOutcome::Deferred
            }
        }
    }

    /// Records whether a user is active; activating one plans a deferred link.
    pub fn set_active_user(&mut self, active: bool) -> Option<PlanHandle> {
        self.has_active_user = active;
        if !active {
            return None;
        }

        let pending = self.pending.take()?;
        let handle = self.spawn_plan(&pending);
        if handle.is_none() {
            self.pending = Some(pending);
        }
        handle
    }

    fn spawn_plan(&self, pending: &PendingUri) -> Option<PlanHandle> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, keeping opened link pending");
            return None;
        };

        let planner = self.planner.clone();
        let PendingUri { host_id, uri } = pending.clone();
        Some(runtime.spawn(async move { planner.plan_and_connect(host_id, &uri).await }))
    }
}
