use crate::backend::{BackendError, BackendResult, NetworkInspector};
use crate::models::NetworkIdentity;
use tracing::{debug, info, warn};
use zbus::blocking::{Connection, Proxy};
use zbus::zvariant::OwnedObjectPath;

pub struct NetworkManagerBackend;

impl NetworkManagerBackend {
    pub fn new() -> Self {
        Self
    }

    /// UUID of the active profile on the device associated with `identity`.
    pub fn active_profile_uuid(&self, identity: &NetworkIdentity) -> BackendResult<Option<String>> {
        let conn = system_bus()?;
        let nm = nm_proxy(&conn)?;

        for device in wifi_devices(&conn, &nm)? {
            if active_ssid(&conn, &device)?.as_deref() != Some(identity.ssid()) {
                continue;
            }
            let active: OwnedObjectPath = device_proxy(&conn, &device)?
                .get_property("ActiveConnection")
                .map_err(|e| BackendError::InspectorUnavailable(e.to_string()))?;
            if is_null_path(&active) {
                return Ok(None);
            }
            let uuid: String = active_connection_proxy(&conn, &active)?
                .get_property("Uuid")
                .map_err(|e| BackendError::InspectorUnavailable(e.to_string()))?;
            debug!(ssid = %identity, uuid = %uuid, "resolved active connection profile");
            return Ok(Some(uuid).filter(|u| !u.is_empty()));
        }

        Ok(None)
    }
}

impl NetworkInspector for NetworkManagerBackend {
    fn current_ssid(&self) -> BackendResult<NetworkIdentity> {
        let conn = system_bus()?;
        let nm = nm_proxy(&conn)?;

        for device in wifi_devices(&conn, &nm)? {
            if let Some(identity) = active_ssid(&conn, &device)?.and_then(NetworkIdentity::new) {
                info!(ssid = %identity, device = %device.as_str(), "connected SSID");
                return Ok(identity);
            }
        }

        Err(BackendError::NoActiveConnection)
    }
}

pub mod nm_consts {
    pub const BUS_NAME: &str = "org.freedesktop.NetworkManager";
    pub const OBJECT_PATH: &str = "/org/freedesktop/NetworkManager";
    pub const NM_INTERFACE: &str = "org.freedesktop.NetworkManager";
    pub const DEVICE_INTERFACE: &str = "org.freedesktop.NetworkManager.Device";
    pub const WIFI_DEVICE_INTERFACE: &str = "org.freedesktop.NetworkManager.Device.Wireless";
    pub const AP_INTERFACE: &str = "org.freedesktop.NetworkManager.AccessPoint";
    pub const ACTIVE_CONNECTION_INTERFACE: &str = "org.freedesktop.NetworkManager.Connection.Active";
}

const NM_DEVICE_TYPE_WIFI: u32 = 2;

fn system_bus() -> BackendResult<Connection> {
    Connection::system().map_err(|e| BackendError::InspectorUnavailable(e.to_string()))
}

fn proxy<'a>(conn: &'a Connection, path: &'a str, interface: &'a str) -> BackendResult<Proxy<'a>> {
    Proxy::new(conn, nm_consts::BUS_NAME, path, interface)
        .map_err(|e| BackendError::InspectorUnavailable(e.to_string()))
}

fn nm_proxy(conn: &Connection) -> BackendResult<Proxy<'_>> {
    proxy(conn, nm_consts::OBJECT_PATH, nm_consts::NM_INTERFACE)
}

fn device_proxy<'a>(conn: &'a Connection, path: &'a OwnedObjectPath) -> BackendResult<Proxy<'a>> {
    proxy(conn, path.as_str(), nm_consts::DEVICE_INTERFACE)
}

fn wireless_proxy<'a>(
    conn: &'a Connection,
    path: &'a OwnedObjectPath,
) -> BackendResult<Proxy<'a>> {
    proxy(conn, path.as_str(), nm_consts::WIFI_DEVICE_INTERFACE)
}

fn ap_proxy<'a>(conn: &'a Connection, path: &'a OwnedObjectPath) -> BackendResult<Proxy<'a>> {
    proxy(conn, path.as_str(), nm_consts::AP_INTERFACE)
}

fn active_connection_proxy<'a>(
    conn: &'a Connection,
    path: &'a OwnedObjectPath,
) -> BackendResult<Proxy<'a>> {
    proxy(conn, path.as_str(), nm_consts::ACTIVE_CONNECTION_INTERFACE)
}

fn wifi_devices(conn: &Connection, nm: &Proxy<'_>) -> BackendResult<Vec<OwnedObjectPath>> {
    let devices: Vec<OwnedObjectPath> = nm
        .call("GetDevices", &())
        .map_err(|e| BackendError::InspectorUnavailable(e.to_string()))?;

    let mut wifi = Vec::new();
    for path in devices {
        let device_type: u32 = device_proxy(conn, &path)?
            .get_property("DeviceType")
            .map_err(|e| BackendError::InspectorUnavailable(e.to_string()))?;
        if device_type == NM_DEVICE_TYPE_WIFI {
            wifi.push(path);
        }
    }

    if wifi.is_empty() {
        return Err(BackendError::InspectorUnavailable(
            "No Wi-Fi device found".to_string(),
        ));
    }
    Ok(wifi)
}

fn active_ssid(conn: &Connection, device: &OwnedObjectPath) -> BackendResult<Option<String>> {
    let active_ap: OwnedObjectPath = wireless_proxy(conn, device)?
        .get_property("ActiveAccessPoint")
        .map_err(|e| BackendError::InspectorUnavailable(e.to_string()))?;
    if is_null_path(&active_ap) {
        return Ok(None);
    }

    let ssid_bytes: Vec<u8> = ap_proxy(conn, &active_ap)?
        .get_property("Ssid")
        .map_err(|e| BackendError::InspectorUnavailable(e.to_string()))?;
    Ok(decode_ssid(&ssid_bytes))
}

fn is_null_path(path: &OwnedObjectPath) -> bool {
    path.as_str() == "/"
}

fn decode_ssid(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    match std::str::from_utf8(bytes) {
        Ok(ssid) => Some(ssid.to_string()),
        Err(_) => {
            let ssid = String::from_utf8_lossy(bytes).into_owned();
            warn!(ssid = %ssid, "SSID is not valid UTF-8; replaced undecodable bytes");
            Some(ssid)
        }
    }
}
