#[cfg(test)]
pub mod mock;
pub mod nm;
pub mod pkexec;
pub mod secret_service;

use crate::models::{Credential, NetworkIdentity};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("No SSID detected. Connect to a Wi-Fi network.")]
    NoActiveConnection,
    #[error("NetworkManager is unavailable: {0}")]
    InspectorUnavailable(String),
    #[error("Secret store is unavailable: {0}")]
    SecretStoreUnavailable(String),
    #[error("Authentication was declined")]
    AuthenticationDeclined,
    #[error("Password not found for SSID '{0}'.")]
    CredentialNotFound(String),
    #[error("Unable to read the stored password: {0}")]
    EscalationUnavailable(String),
    #[error("Failed to render QR code: {0}")]
    RenderError(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Reports the wireless network this machine is associated with.
pub trait NetworkInspector {
    fn current_ssid(&self) -> BackendResult<NetworkIdentity>;
}

/// Unprivileged lookup, `Ok(None)` when nothing is stored.
pub trait SecretStore {
    fn read_secret(&self, identity: &NetworkIdentity) -> BackendResult<Option<Credential>>;
}

/// Reads the key from system network configuration behind an auth prompt.
pub trait PrivilegedReader {
    fn escalate_and_read(&self, identity: &NetworkIdentity) -> BackendResult<Option<Credential>>;
}
