use shared_types::{AccessDecision, AppError, SessionInfo};

use crate::backend::Backend;

/// Where the admin page stands with respect to the role check.
#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    /// The check has not completed yet; nothing admin-only is rendered.
    Checking,
    Decided(AccessDecision),
    /// The access check itself failed.
    Failed(AppError),
}

/// Role gate in front of the admin dashboard.
///
/// `check` runs once when the page mounts. Later sign-in or sign-out events
/// are fed through [`AdminGate::on_session_change`].
#[derive(Debug, Clone)]
pub struct AdminGate {
    state: GateState,
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Checking,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn decision(&self) -> Option<&AccessDecision> {
        match &self.state {
            GateState::Decided(decision) => Some(decision),
            _ => None,
        }
    }

    pub fn is_granted(&self) -> bool {
        self.decision().is_some_and(AccessDecision::is_granted)
    }

    /// Login path to navigate to, when the gate says so.
    pub fn redirect(&self) -> Option<&str> {
        match self.decision() {
            Some(AccessDecision::RedirectToLogin { location }) => Some(location),
            _ => None,
        }
    }

    pub async fn check(&mut self, backend: &dyn Backend) -> &GateState {
        self.state = GateState::Checking;
        self.state = match backend.access().await {
            Ok(decision) => GateState::Decided(decision),
            Err(e) => {
                tracing::warn!(error = %e, "admin access check failed");
                GateState::Failed(e)
            }
        };
        &self.state
    }

    /// Re-evaluate after the auth state changed. Losing the session always
    /// sends the user back to the login page without asking the server.
    pub async fn on_session_change(
        &mut self,
        backend: &dyn Backend,
        session: Option<&SessionInfo>,
    ) -> &GateState {
        match session {
            None => {
                self.state = GateState::Decided(AccessDecision::evaluate(None));
                &self.state
            }
            Some(_) => self.check(backend).await,
        }
    }
}
