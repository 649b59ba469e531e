// Profile selector
//
// Lists the advertiser profiles and switches the active one. A switch changes
// the server-side context, so nothing the client holds can be trusted after
// it: a successful selection yields `SessionInvalidated` and the caller must
// restart the session rather than refetch.

use super::UpdateSender;
use crate::gateway::{GatewayClient, GatewayError};
use crate::model::{Profile, ProfileId};

#[derive(Debug)]
pub enum ProfileUpdate {
    Profiles(Result<Vec<Profile>, GatewayError>),
    Selected {
        profile_id: ProfileId,
        result: Result<(), GatewayError>,
    },
}

/// Marker returned when the active profile changed and the session is stale
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the session must be restarted after a profile switch"]
pub struct SessionInvalidated {
    pub profile_id: ProfileId,
}

pub struct ProfileSelector {
    client: GatewayClient,
    updates: UpdateSender,
    profiles: Vec<Profile>,
    /// Render gate: false until the profile list arrives
    loaded: bool,
    requested: bool,
}

impl ProfileSelector {
    pub fn new(client: GatewayClient, updates: UpdateSender) -> Self {
        Self {
            client,
            updates,
            profiles: Vec::new(),
            loaded: false,
            requested: false,
        }
    }

    /// Fetch the profile list once per session
    pub fn load(&mut self) {
        if self.requested {
            return;
        }
        self.requested = true;

        let client = self.client.clone();
        self.updates
            .spawn(async move { ProfileUpdate::Profiles(client.profiles().await) });
    }

    /// Issue `select-profile` for the given id
    pub fn select(&self, profile_id: ProfileId) {
        tracing::info!(%profile_id, "Selecting profile");

        let client = self.client.clone();
        self.updates.spawn(async move {
            let result = client.select_profile(profile_id.clone()).await;
            ProfileUpdate::Selected { profile_id, result }
        });
    }

    /// Merge a finished call; a successful selection invalidates the session
    pub fn apply(&mut self, update: ProfileUpdate) -> Option<SessionInvalidated> {
        match update {
            ProfileUpdate::Profiles(Ok(profiles)) => {
                tracing::debug!(count = profiles.len(), "Profiles loaded");
                self.profiles = profiles;
                self.loaded = true;
                None
            }
            ProfileUpdate::Profiles(Err(e)) => {
                tracing::warn!("Failed to load profiles: {}", e);
                None
            }
            ProfileUpdate::Selected {
                profile_id,
                result: Ok(()),
            } => Some(SessionInvalidated { profile_id }),
            ProfileUpdate::Selected {
                profile_id,
                result: Err(e),
            } => {
                tracing::warn!(%profile_id, "Failed to select profile: {}", e);
                None
            }
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
