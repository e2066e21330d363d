use std::fmt;

/// SSID of the connected network. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkIdentity {
    ssid: String,
}

impl NetworkIdentity {
    pub fn new(ssid: impl Into<String>) -> Option<Self> {
        let ssid = ssid.into();
        if ssid.is_empty() {
            return None;
        }
        Some(Self { ssid })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }
}

impl fmt::Display for NetworkIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ssid)
    }
}

/// Pre-shared key. Debug output is redacted and there is no Display impl.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    secret: String,
}

impl Credential {
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return None;
        }
        Some(Self { secret })
    }

    pub fn expose(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::{Credential, NetworkIdentity};

    #[test]
    fn identity_rejects_empty_ssid() {
        assert!(NetworkIdentity::new("").is_none());
        assert_eq!(NetworkIdentity::new("HomeNet").unwrap().ssid(), "HomeNet");
    }

    #[test]
    fn identity_keeps_whitespace_verbatim() {
        assert_eq!(NetworkIdentity::new(" Cafe ").unwrap().ssid(), " Cafe ");
        assert_eq!(NetworkIdentity::new("   ").unwrap().ssid(), "   ");
    }

    #[test]
    fn credential_rejects_empty_key() {
        assert!(Credential::new("").is_none());
        assert_eq!(Credential::new("s3cr3t!").unwrap().expose(), "s3cr3t!");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("s3cr3t!").unwrap();
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("s3cr3t!"));
        assert_eq!(rendered, "Credential(<redacted>)");
    }
}
