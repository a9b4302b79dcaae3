//! Host key-selection capability.
//!
//! Pro-tier generation needs a user-selected, billed API key. Hosts that
//! can run a key-selection flow implement [`KeySelection`]; everywhere
//! else the ambient stub reports a key as selected and standard-tier calls
//! proceed on the configured credential.
use crate::error::{AppError, AppResult};

pub trait KeySelection: Send + Sync {
    /// Whether a user-selected API key is available for pro-tier calls.
    fn has_selected_key(&self) -> bool;

    /// Run the host's key-selection flow.
    fn select_key(&self) -> AppResult<()>;
}

/// Non-host environments: assume the ambient credential works.
pub struct AmbientKeySelection;

impl KeySelection for AmbientKeySelection {
    fn has_selected_key(&self) -> bool {
        true
    }

    fn select_key(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Fixed-answer capability for tests and for hosts that only gate.
pub struct StaticKeySelection(pub bool);

impl KeySelection for StaticKeySelection {
    fn has_selected_key(&self) -> bool {
        self.0
    }

    fn select_key(&self) -> AppResult<()> {
        if self.0 {
            Ok(())
        } else {
            Err(AppError::KeyNotSelected)
        }
    }
}
