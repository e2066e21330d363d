use crate::backend::{BackendResult, NetworkInspector};
use crate::models::{Credential, NetworkIdentity};
use crate::retriever::CredentialRetriever;
use tracing::info;

/// Shows the network to the user; returns once they dismiss it.
pub trait Presenter {
    fn present(&self, identity: &NetworkIdentity, credential: &Credential) -> BackendResult<()>;
}

pub fn run(
    inspector: &dyn NetworkInspector,
    retriever: &CredentialRetriever<'_>,
    presenter: &dyn Presenter,
) -> BackendResult<()> {
    let identity = inspector.current_ssid()?;
    let credential = retriever.retrieve_credential(&identity)?;
    presenter.present(&identity, &credential)?;
    info!(ssid = %identity, "window closed");
    Ok(())
}
