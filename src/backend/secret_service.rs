use crate::backend::{BackendError, BackendResult, SecretStore};
use crate::models::{Credential, NetworkIdentity};
use std::collections::HashMap;
use tracing::{debug, warn};
use zbus::blocking::{Connection, Proxy};
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

pub mod secret_consts {
    pub const BUS_NAME: &str = "org.freedesktop.secrets";
    pub const OBJECT_PATH: &str = "/org/freedesktop/secrets";
    pub const SERVICE_INTERFACE: &str = "org.freedesktop.Secret.Service";
    pub const SESSION_INTERFACE: &str = "org.freedesktop.Secret.Session";
    pub const PLAIN_ALGORITHM: &str = "plain";
}

/// `(session, parameters, value, content_type)` as returned by `GetSecrets`.
type SecretStruct = (OwnedObjectPath, Vec<u8>, Vec<u8>, String);

/// Read-only lookup in the desktop keyring over the Secret Service API.
pub struct SecretServiceStore {
    service_name: String,
}

impl SecretServiceStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl SecretStore for SecretServiceStore {
    fn read_secret(&self, identity: &NetworkIdentity) -> BackendResult<Option<Credential>> {
        let conn = session_bus()?;
        let service = service_proxy(&conn)?;

        let attributes = lookup_attributes(&self.service_name, identity);
        let (unlocked, locked): (Vec<OwnedObjectPath>, Vec<OwnedObjectPath>) = service
            .call("SearchItems", &attributes)
            .map_err(unavailable)?;
        if !locked.is_empty() {
            debug!(count = locked.len(), "skipping locked keyring items");
        }
        if unlocked.is_empty() {
            return Ok(None);
        }

        let (_, session): (OwnedValue, OwnedObjectPath) = service
            .call(
                "OpenSession",
                &(secret_consts::PLAIN_ALGORITHM, Value::from("")),
            )
            .map_err(unavailable)?;

        let secrets: BackendResult<HashMap<OwnedObjectPath, SecretStruct>> = service
            .call("GetSecrets", &(&unlocked, &session))
            .map_err(unavailable);
        close_session(&conn, &session);

        let secrets = secrets?;
        Ok(unlocked
            .iter()
            .filter_map(|item| secrets.get(item))
            .find_map(|(_, _, value, _)| decode_secret(value)))
    }
}

fn lookup_attributes<'a>(
    service_name: &'a str,
    identity: &'a NetworkIdentity,
) -> HashMap<&'a str, &'a str> {
    HashMap::from([("service", service_name), ("username", identity.ssid())])
}

fn decode_secret(value: &[u8]) -> Option<Credential> {
    match std::str::from_utf8(value) {
        Ok(text) => Credential::new(text),
        Err(_) => {
            warn!("ignoring keyring item that is not valid UTF-8");
            None
        }
    }
}

fn close_session(conn: &Connection, session: &OwnedObjectPath) {
    let closed = Proxy::new(
        conn,
        secret_consts::BUS_NAME,
        session.as_str(),
        secret_consts::SESSION_INTERFACE,
    )
    .and_then(|proxy| proxy.call_method("Close", &()).map(|_| ()));
    if let Err(err) = closed {
        debug!(error = %err, "failed to close secret service session");
    }
}

fn unavailable(err: zbus::Error) -> BackendError {
    BackendError::SecretStoreUnavailable(err.to_string())
}

fn session_bus() -> BackendResult<Connection> {
    Connection::session().map_err(unavailable)
}

fn service_proxy(conn: &Connection) -> BackendResult<Proxy<'_>> {
    Proxy::new(
        conn,
        secret_consts::BUS_NAME,
        secret_consts::OBJECT_PATH,
        secret_consts::SERVICE_INTERFACE,
    )
    .map_err(unavailable)
}
