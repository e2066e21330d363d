//! Wi-Fi network configuration payload as understood by phone camera apps.

use crate::models::{Credential, NetworkIdentity};

pub fn wifi_payload(identity: &NetworkIdentity, credential: &Credential) -> String {
    format!(
        "WIFI:T:WPA;S:{};P:{};;",
        escape_field(identity.ssid()),
        escape_field(credential.expose())
    )
}

/// Backslash-escapes the characters that delimit payload fields.
fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(ssid: &str, psk: &str) -> String {
        wifi_payload(
            &NetworkIdentity::new(ssid).unwrap(),
            &Credential::new(psk).unwrap(),
        )
    }

    #[test]
    fn formats_home_network() {
        assert_eq!(
            payload("HomeNet", "s3cr3t!"),
            "WIFI:T:WPA;S:HomeNet;P:s3cr3t!;;"
        );
    }

    #[test]
    fn plain_fields_are_copied_verbatim() {
        for (ssid, psk) in [
            ("Coffee Shop 5G", "correct horse battery staple"),
            ("Ünïcødé", "päßwörd-123"),
            ("x", "12345678"),
            (" Cafe ", "  spaced key  "),
        ] {
            assert_eq!(
                payload(ssid, psk),
                format!("WIFI:T:WPA;S:{ssid};P:{psk};;")
            );
        }
    }

    #[test]
    fn comma_and_quote_are_escaped_even_without_colon_or_semicolon() {
        assert_eq!(
            payload("HomeNet", r#"pass,word"x"#),
            r#"WIFI:T:WPA;S:HomeNet;P:pass\,word\"x;;"#
        );
    }

    #[test]
    fn delimiters_are_escaped() {
        assert_eq!(
            payload(r#"My;Net:"5G""#, r"a\b,c"),
            r#"WIFI:T:WPA;S:My\;Net\:\"5G\";P:a\\b\,c;;"#
        );
    }
}
