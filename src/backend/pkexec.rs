use crate::backend::nm::NetworkManagerBackend;
use crate::backend::{BackendError, BackendResult, PrivilegedReader};
use crate::models::{Credential, NetworkIdentity};
use std::io::ErrorKind;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// pkexec: the user dismissed the authentication dialog.
const PKEXEC_DISMISSED: i32 = 126;
/// pkexec: not authorized, or authentication failed.
const PKEXEC_NOT_AUTHORIZED: i32 = 127;
/// nmcli: connection, device, or access point does not exist.
const NMCLI_NOT_FOUND: i32 = 10;

/// Runs `nmcli` through `pkexec` to read the stored PSK of a profile.
pub struct PkexecReader {
    psk_field: String,
    locator: NetworkManagerBackend,
}

impl PkexecReader {
    pub fn new(psk_field: impl Into<String>, locator: NetworkManagerBackend) -> Self {
        Self {
            psk_field: psk_field.into(),
            locator,
        }
    }

    fn profile_selector(&self, identity: &NetworkIdentity) -> (&'static str, String) {
        match self.locator.active_profile_uuid(identity) {
            Ok(Some(uuid)) => ("uuid", uuid),
            Ok(None) => ("id", identity.ssid().to_string()),
            Err(err) => {
                warn!(error = %err, "could not resolve active profile; falling back to SSID");
                ("id", identity.ssid().to_string())
            }
        }
    }
}

impl PrivilegedReader for PkexecReader {
    fn escalate_and_read(&self, identity: &NetworkIdentity) -> BackendResult<Option<Credential>> {
        let (kind, profile) = self.profile_selector(identity);
        let args = nmcli_args(&self.psk_field, kind, &profile);
        debug!(command = %format!("pkexec nmcli {}", args.join(" ")), "requesting elevated read");

        let output = Command::new("pkexec")
            .arg("nmcli")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    BackendError::EscalationUnavailable("pkexec is not installed".to_string())
                }
                _ => BackendError::EscalationUnavailable(format!("failed to execute pkexec: {e}")),
            })?;

        let credential = classify(output.status.code(), &output.stdout, &output.stderr)?;
        if credential.is_some() {
            info!(ssid = %identity, "password retrieved");
        }
        Ok(credential)
    }
}

fn nmcli_args<'a>(psk_field: &'a str, kind: &'a str, profile: &'a str) -> Vec<&'a str> {
    vec![
        "--escape", "no", "-s", "-g", psk_field, "connection", "show", kind, profile,
    ]
}

fn classify(
    code: Option<i32>,
    stdout: &[u8],
    stderr: &[u8],
) -> BackendResult<Option<Credential>> {
    match code {
        Some(0) => {
            let text = String::from_utf8_lossy(stdout);
            Ok(Credential::new(text.trim_end_matches(['\r', '\n'])))
        }
        Some(PKEXEC_DISMISSED | PKEXEC_NOT_AUTHORIZED) => Err(BackendError::AuthenticationDeclined),
        Some(NMCLI_NOT_FOUND) => Ok(None),
        Some(code) => Err(BackendError::EscalationUnavailable(format!(
            "nmcli exited with status {code}: {}",
            String::from_utf8_lossy(stderr).trim()
        ))),
        None => Err(BackendError::EscalationUnavailable(
            "nmcli was terminated by a signal".to_string(),
        )),
    }
}
