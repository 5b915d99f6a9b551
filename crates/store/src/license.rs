//! License binder
//!
//! Couples one physical install to one database image by comparing the
//! profile's `installation_id` with the host-local installation anchor.
//! The state is recomputed on every boot and after every restore.

use crate::handle::Store;
use lumbung_core::{Result, INSTALLATION_ID_FIELD};
use tracing::warn;

/// License-binding state, a first-class application state rather than an
/// error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// No profile row, or the profile has no installation id yet
    Unbound,
    /// The profile's installation id equals this host's anchor
    BoundMatch,
    /// The profile's installation id differs from the anchor, or the
    /// anchor is absent while the id is set.
    ///
    /// Full lockout: the shell must deny reads and writes and present
    /// only a sign-out affordance. There is no supported transition out
    /// other than an operator-level reset of both the image and the
    /// anchor.
    BoundMismatch,
}

impl BindingState {
    /// Whether the application must render the lock screen
    pub fn is_locked(self) -> bool {
        matches!(self, BindingState::BoundMismatch)
    }
}

impl Store {
    /// Compute the binding state from the profile and the anchor
    pub fn binding_state(&self) -> Result<BindingState> {
        let profile = self.profile()?;
        let installation_id = profile
            .as_ref()
            .and_then(|row| row.get_text(INSTALLATION_ID_FIELD));

        let Some(installation_id) = installation_id else {
            return Ok(BindingState::Unbound);
        };
        match self.anchor().load()? {
            Some(anchor) if anchor == installation_id => Ok(BindingState::BoundMatch),
            Some(_) => {
                warn!("installation id does not match this host's anchor");
                Ok(BindingState::BoundMismatch)
            }
            None => {
                warn!("profile carries an installation id but this host has no anchor");
                Ok(BindingState::BoundMismatch)
            }
        }
    }
}
