//! Server-side session registry with change notification.
//!
//! Each browser session that signs in gets a registry entry holding the
//! authenticated identity, a watch channel publishing `Option<AuthSession>`,
//! and the session's workspace (dataset reference, conversation log, query
//! flow). Subscribers observe the current value immediately and every change
//! afterwards; dropping the receiver releases the subscription.

pub mod guard;

pub use guard::{GuardState, SessionGuard};

use crate::models::message::Message;
use crate::models::query::QueryFlow;
use crate::models::user::AuthSession;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

/// Mutable per-session state behind the authenticated surface.
#[derive(Debug, Default)]
pub struct Workspace {
    pub dataset: Option<String>,
    pub messages: Vec<Message>,
    pub flow: QueryFlow,
}

impl Workspace {
    /// Record a dataset reference and announce it in the log.
    pub fn attach_dataset(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.messages.push(Message::system(format!(
            "Successfully attached \"{}\". You can now ask questions about this dataset.",
            name
        )));
        self.dataset = Some(name);
    }

    /// Drop the dataset reference; the conversation log goes with it.
    pub fn remove_dataset(&mut self) {
        self.dataset = None;
        self.messages.clear();
    }
}

pub struct SessionEntry {
    session: AuthSession,
    tx: watch::Sender<Option<AuthSession>>,
    pub workspace: Mutex<Workspace>,
}

impl SessionEntry {
    pub fn session(&self) -> &AuthSession {
        &self.session
    }
}

/// Registry of live sessions, keyed by the opaque value stored in the
/// session cookie.
//
// TODO: sweep entries orphaned by cookie-session inactivity expiry; today
// they are only removed on explicit sign-out.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<DashMap<Uuid, Arc<SessionEntry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly authenticated session and return its key.
    pub fn insert(&self, session: AuthSession) -> Uuid {
        let key = Uuid::new_v4();
        let (tx, _rx) = watch::channel(Some(session.clone()));
        self.inner.insert(
            key,
            Arc::new(SessionEntry {
                session,
                tx,
                workspace: Mutex::new(Workspace::default()),
            }),
        );
        key
    }

    pub fn get(&self, key: &Uuid) -> Option<Arc<SessionEntry>> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    /// Tear the session down. Subscribers see `None`; the workspace is gone
    /// once outstanding references drop.
    pub fn remove(&self, key: &Uuid) {
        if let Some((_, entry)) = self.inner.remove(key) {
            entry.tx.send_replace(None);
        }
    }

    /// Subscribe to the session's state. The receiver holds the current
    /// value at subscription time; an unknown key yields `None`.
    pub fn subscribe(&self, key: &Uuid) -> watch::Receiver<Option<AuthSession>> {
        match self.inner.get(key) {
            Some(entry) => entry.tx.subscribe(),
            None => watch::channel(None).1,
        }
    }
}
