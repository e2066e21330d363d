use crate::backend::{
    BackendError, BackendResult, NetworkInspector, PrivilegedReader, SecretStore,
};
use crate::models::{Credential, NetworkIdentity};
use std::cell::Cell;

/// Scripted stand-in for every backend seam, counting how often each is hit.
pub struct MockBackend {
    ssid: Result<String, BackendError>,
    stored: Result<Option<String>, BackendError>,
    privileged: Result<Option<String>, BackendError>,
    pub inspect_calls: Cell<usize>,
    pub store_calls: Cell<usize>,
    pub escalate_calls: Cell<usize>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            ssid: Ok("Home_Fiber_5G".to_string()),
            stored: Ok(None),
            privileged: Ok(Some("correct-horse".to_string())),
            inspect_calls: Cell::new(0),
            store_calls: Cell::new(0),
            escalate_calls: Cell::new(0),
        }
    }

    pub fn with_ssid(mut self, ssid: Result<&str, BackendError>) -> Self {
        self.ssid = ssid.map(str::to_string);
        self
    }

    pub fn with_stored(mut self, stored: Result<Option<&str>, BackendError>) -> Self {
        self.stored = stored.map(|s| s.map(str::to_string));
        self
    }

    pub fn with_privileged(mut self, privileged: Result<Option<&str>, BackendError>) -> Self {
        self.privileged = privileged.map(|s| s.map(str::to_string));
        self
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl NetworkInspector for MockBackend {
    fn current_ssid(&self) -> BackendResult<NetworkIdentity> {
        bump(&self.inspect_calls);
        let ssid = self.ssid.clone()?;
        NetworkIdentity::new(ssid).ok_or(BackendError::NoActiveConnection)
    }
}

impl SecretStore for MockBackend {
    fn read_secret(&self, _identity: &NetworkIdentity) -> BackendResult<Option<Credential>> {
        bump(&self.store_calls);
        Ok(self.stored.clone()?.and_then(Credential::new))
    }
}

impl PrivilegedReader for MockBackend {
    fn escalate_and_read(&self, _identity: &NetworkIdentity) -> BackendResult<Option<Credential>> {
        bump(&self.escalate_calls);
        Ok(self.privileged.clone()?.and_then(Credential::new))
    }
}
