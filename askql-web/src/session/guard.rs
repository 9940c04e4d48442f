use crate::models::user::AuthSession;
use tokio::sync::watch;

/// Gate state for the protected surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Subscription not yet consulted; nothing protected is rendered.
    Checking,
    Authenticated(AuthSession),
    Unauthenticated,
}

impl GuardState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, GuardState::Authenticated(_))
    }
}

/// Consumes a session subscription and resolves access to the protected
/// surface. Starts in `Checking`; the first observed value settles it.
/// `Authenticated` can fall to `Unauthenticated` at any later change, and
/// `Unauthenticated` is terminal — there is no way back to `Checking`.
/// Dropping the guard drops the receiver, which is the unsubscribe.
pub struct SessionGuard {
    rx: watch::Receiver<Option<AuthSession>>,
    state: GuardState,
}

impl SessionGuard {
    pub fn new(rx: watch::Receiver<Option<AuthSession>>) -> Self {
        Self {
            rx,
            state: GuardState::Checking,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Settle the guard on the value the subscription currently holds.
    pub fn resolve(&mut self) -> GuardState {
        let current = self.rx.borrow_and_update().clone();
        self.apply(current);
        self.state.clone()
    }

    /// Wait for the next change and re-settle. A dropped sender means the
    /// session is gone.
    pub async fn changed(&mut self) -> GuardState {
        match self.rx.changed().await {
            Ok(()) => {
                let current = self.rx.borrow_and_update().clone();
                self.apply(current);
            }
            Err(_) => self.apply(None),
        }
        self.state.clone()
    }

    fn apply(&mut self, value: Option<AuthSession>) {
        if self.state == GuardState::Unauthenticated {
            return;
        }
        self.state = match value {
            Some(session) => GuardState::Authenticated(session),
            None => GuardState::Unauthenticated,
        };
    }
}
