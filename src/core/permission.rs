//! Mirrored permission state for the location capability.

/// Name the platform's permission query uses for location access.
pub const GEOLOCATION_PERMISSION: &str = "geolocation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The host has no permission query capability at all.
    CapabilityAbsent,
    /// The query exists but rejected.
    QueryFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
    Unavailable(Unavailable),
}

impl PermissionState {
    /// Parse one of the platform's state strings.
    pub fn parse(v: &str) -> Option<Self> {
        match v.trim().to_ascii_lowercase().as_str() {
            "granted" => Some(PermissionState::Granted),
            "denied" => Some(PermissionState::Denied),
            "prompt" => Some(PermissionState::Prompt),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
            PermissionState::Prompt => "prompt",
            PermissionState::Unavailable(Unavailable::CapabilityAbsent) => {
                "unavailable (capability absent)"
            }
            PermissionState::Unavailable(Unavailable::QueryFailed) => "unavailable (query failed)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_platform_strings() {
        assert_eq!(PermissionState::parse("granted"), Some(PermissionState::Granted));
        assert_eq!(PermissionState::parse(" Denied "), Some(PermissionState::Denied));
        assert_eq!(PermissionState::parse("prompt"), Some(PermissionState::Prompt));
        assert_eq!(PermissionState::parse("maybe"), None);
    }

    #[test]
    fn unavailable_labels_name_the_reason() {
        let absent = PermissionState::Unavailable(Unavailable::CapabilityAbsent);
        let failed = PermissionState::Unavailable(Unavailable::QueryFailed);
        assert!(absent.label().contains("capability absent"));
        assert!(failed.label().contains("query failed"));
        assert_ne!(absent.label(), failed.label());
    }
}
