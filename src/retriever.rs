use crate::backend::{BackendError, BackendResult, PrivilegedReader, SecretStore};
use crate::models::{Credential, NetworkIdentity};
use tracing::{debug, info, warn};

/// Keyring first, then the privileged read from NetworkManager's store.
pub struct CredentialRetriever<'a> {
    store: &'a dyn SecretStore,
    escalation: &'a dyn PrivilegedReader,
}

impl<'a> CredentialRetriever<'a> {
    pub fn new(store: &'a dyn SecretStore, escalation: &'a dyn PrivilegedReader) -> Self {
        Self { store, escalation }
    }

    pub fn retrieve_credential(&self, identity: &NetworkIdentity) -> BackendResult<Credential> {
        match self.store.read_secret(identity) {
            Ok(Some(credential)) => {
                info!(ssid = %identity, "password found in keyring");
                return Ok(credential);
            }
            Ok(None) => debug!(ssid = %identity, "no keyring entry"),
            Err(err) => warn!(error = %err, "keyring lookup failed; continuing without it"),
        }

        self.escalation
            .escalate_and_read(identity)?
            .ok_or_else(|| BackendError::CredentialNotFound(identity.ssid().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    fn home() -> NetworkIdentity {
        NetworkIdentity::new("HomeNet").unwrap()
    }

    #[test]
    fn keyring_hit_skips_escalation() {
        let backend = MockBackend::new().with_stored(Ok(Some("from-keyring")));
        let retriever = CredentialRetriever::new(&backend, &backend);

        let credential = retriever.retrieve_credential(&home()).unwrap();

        assert_eq!(credential.expose(), "from-keyring");
        assert_eq!(backend.escalate_calls.get(), 0);
    }

    #[test]
    fn keyring_miss_escalates() {
        let backend = MockBackend::new().with_privileged(Ok(Some("from-nm")));
        let retriever = CredentialRetriever::new(&backend, &backend);

        let credential = retriever.retrieve_credential(&home()).unwrap();

        assert_eq!(credential.expose(), "from-nm");
        assert_eq!(backend.store_calls.get(), 1);
        assert_eq!(backend.escalate_calls.get(), 1);
    }

    #[test]
    fn keyring_failure_is_not_fatal() {
        let backend = MockBackend::new()
            .with_stored(Err(BackendError::SecretStoreUnavailable("no bus".into())))
            .with_privileged(Ok(Some("from-nm")));
        let retriever = CredentialRetriever::new(&backend, &backend);

        assert_eq!(retriever.retrieve_credential(&home()).unwrap().expose(), "from-nm");
    }

    #[test]
    fn empty_keyring_entry_counts_as_missing() {
        let backend = MockBackend::new()
            .with_stored(Ok(Some("")))
            .with_privileged(Ok(Some("from-nm")));
        let retriever = CredentialRetriever::new(&backend, &backend);

        assert_eq!(retriever.retrieve_credential(&home()).unwrap().expose(), "from-nm");
        assert_eq!(backend.escalate_calls.get(), 1);
    }

    #[test]
    fn declined_prompt_is_propagated() {
        let backend = MockBackend::new().with_privileged(Err(BackendError::AuthenticationDeclined));
        let retriever = CredentialRetriever::new(&backend, &backend);

        assert_eq!(
            retriever.retrieve_credential(&home()).unwrap_err(),
            BackendError::AuthenticationDeclined
        );
    }

    #[test]
    fn nothing_stored_anywhere_is_not_found() {
        let backend = MockBackend::new().with_privileged(Ok(None));
        let retriever = CredentialRetriever::new(&backend, &backend);

        assert_eq!(
            retriever.retrieve_credential(&home()).unwrap_err(),
            BackendError::CredentialNotFound("HomeNet".to_string())
        );
    }
}
