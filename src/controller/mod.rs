// Controllers - UI state owners for the two screens
//
// Each screen's state lives in one controller that is only mutated on the UI
// loop. Gateway calls run as spawned tasks; their results come back as
// `SessionEvent`s on an mpsc channel and are applied by the loop.
//
// Every event is tagged with the session that issued the call. A session is
// one "page load": switching profiles invalidates it, and events still in
// flight for an old session are dropped by the receiver.

mod form;
mod profiles;
mod reports;

pub use form::{FormField, PendingForm, ValidationError};
pub use profiles::{ProfileSelector, ProfileUpdate, SessionInvalidated};
pub use reports::{ReportController, ReportUpdate};

use std::future::Future;
use tokio::sync::mpsc;

/// Identifies one UI session (page load)
pub type SessionId = u64;

/// Buffer size for the session event channel
pub const UPDATE_CHANNEL_SIZE: usize = 256;

/// Result of a finished gateway call, routed to the owning controller
#[derive(Debug)]
pub enum Update {
    Reports(ReportUpdate),
    Profiles(ProfileUpdate),
}

impl From<ReportUpdate> for Update {
    fn from(update: ReportUpdate) -> Self {
        Update::Reports(update)
    }
}

impl From<ProfileUpdate> for Update {
    fn from(update: ProfileUpdate) -> Self {
        Update::Profiles(update)
    }
}

#[derive(Debug)]
pub struct SessionEvent {
    pub session: SessionId,
    pub update: Update,
}

/// Session-tagged sender handed to controllers
#[derive(Clone)]
pub struct UpdateSender {
    session: SessionId,
    tx: mpsc::Sender<SessionEvent>,
}

impl UpdateSender {
    pub fn new(session: SessionId, tx: mpsc::Sender<SessionEvent>) -> Self {
        Self { session, tx }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Run `call` on the runtime and deliver its result to the UI loop
    pub fn spawn<F, U>(&self, call: F)
    where
        F: Future<Output = U> + Send + 'static,
        U: Into<Update> + Send + 'static,
    {
        let tx = self.tx.clone();
        let session = self.session;
        tokio::spawn(async move {
            let update = call.await.into();
            // Receiver gone means the UI is shutting down
            let _ = tx.send(SessionEvent { session, update }).await;
        });
    }
}
