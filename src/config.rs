pub const APP_ID: &str = "io.github.wisharify";
pub const WINDOW_TITLE: &str = "Wisharify QR Code";
pub const FONT_FAMILY: &str = "Helvetica";
pub const FONT_SIZE_PT: u32 = 16;
pub const QR_IMAGE_SIZE: u32 = 450;
pub const QR_QUIET_ZONE: u32 = 5;
pub const KEYRING_SERVICE_NAME: &str = "nmcli-wifi";
pub const NMCLI_PSK_FIELD: &str = "802-11-wireless-security.psk";

#[derive(Clone, Debug)]
pub struct Settings {
    pub app_id: String,
    pub window: WindowSettings,
    pub qr: QrSettings,
    pub keyring_service: String,
    pub psk_field: String,
}

#[derive(Clone, Debug)]
pub struct WindowSettings {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub font_family: String,
    pub font_size_pt: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrSettings {
    /// Upper bound for the rendered bitmap edge, in pixels.
    pub image_size: u32,
    /// Light border around the symbol, in modules.
    pub quiet_zone: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_id: APP_ID.to_string(),
            window: WindowSettings::default(),
            qr: QrSettings::default(),
            keyring_service: KEYRING_SERVICE_NAME.to_string(),
            psk_field: NMCLI_PSK_FIELD.to_string(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        let edge = (QR_IMAGE_SIZE + QR_QUIET_ZONE * 12) as i32;
        Self {
            title: WINDOW_TITLE.to_string(),
            width: edge,
            height: edge,
            font_family: FONT_FAMILY.to_string(),
            font_size_pt: FONT_SIZE_PT,
        }
    }
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            image_size: QR_IMAGE_SIZE,
            quiet_zone: QR_QUIET_ZONE,
        }
    }
}
