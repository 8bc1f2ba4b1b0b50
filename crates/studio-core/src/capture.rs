//! Capture settings for an application.
//!
//! A capture block records whether request/response payloads flowing through
//! the gateway are captured, separately for the inbound side (client to
//! gateway) and the outbound side (gateway to protected application).
//!
//! A stored capture block always has at least one flag set. An all-false
//! configuration is represented by the absence of the block.

use serde::{Deserialize, Serialize};

/// Request/response capture flags for one side of the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct CaptureDirection {
    #[serde(default)]
    pub request: bool,
    #[serde(default)]
    pub response: bool,
}

impl CaptureDirection {
    pub fn new(request: bool, response: bool) -> Self {
        Self { request, response }
    }

    /// Whether either flag is set
    pub fn any(&self) -> bool {
        self.request || self.response
    }

    /// Names of the captured message kinds, as understood by the gateway
    /// capture decorator (`"request"`, `"response"`).
    pub fn captured_kinds(&self) -> Vec<&'static str> {
        let mut kinds = Vec::with_capacity(2);
        if self.request {
            kinds.push("request");
        }
        if self.response {
            kinds.push("response");
        }
        kinds
    }
}

/// Capture configuration stored under `content.capture`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct CaptureConfig {
    #[serde(default)]
    pub inbound: CaptureDirection,
    #[serde(default)]
    pub outbound: CaptureDirection,
}

impl CaptureConfig {
    pub fn new(inbound: CaptureDirection, outbound: CaptureDirection) -> Self {
        Self { inbound, outbound }
    }

    /// Build a configuration from the four flags, in
    /// inbound request, inbound response, outbound request, outbound response order.
    pub fn from_flags(flags: [bool; 4]) -> Self {
        Self {
            inbound: CaptureDirection::new(flags[0], flags[1]),
            outbound: CaptureDirection::new(flags[2], flags[3]),
        }
    }

    /// The four flags in the same order accepted by [`CaptureConfig::from_flags`]
    pub fn flags(&self) -> [bool; 4] {
        [
            self.inbound.request,
            self.inbound.response,
            self.outbound.request,
            self.outbound.response,
        ]
    }

    /// Capture is enabled iff at least one flag is set
    pub fn is_enabled(&self) -> bool {
        self.inbound.any() || self.outbound.any()
    }

    /// The value to store in the owning content: `None` when disabled.
    pub fn into_stored(self) -> Option<Self> {
        self.is_enabled().then_some(self)
    }
}

/// Resolve the effective capture configuration of a stored block
pub fn effective_capture(stored: Option<&CaptureConfig>) -> CaptureConfig {
    stored.copied().unwrap_or_default()
}

/// Whether a capture configuration has any flag set
pub fn is_capture_enabled(capture: &CaptureConfig) -> bool {
    capture.is_enabled()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_flag_combinations() -> impl Iterator<Item = [bool; 4]> {
        (0u8..16).map(|bits| {
            [
                bits & 0b1000 != 0,
                bits & 0b0100 != 0,
                bits & 0b0010 != 0,
                bits & 0b0001 != 0,
            ]
        })
    }

    #[test]
    fn test_default_capture_is_disabled() {
        let capture = CaptureConfig::default();
        assert!(!capture.is_enabled());
        assert_eq!(capture.flags(), [false; 4]);
    }

    #[test]
    fn test_enabled_iff_any_flag_set() {
        for flags in all_flag_combinations() {
            let capture = CaptureConfig::from_flags(flags);
            assert_eq!(
                is_capture_enabled(&capture),
                flags.iter().any(|f| *f),
                "flags {:?}",
                flags
            );
        }
    }

    #[test]
    fn test_into_stored_drops_disabled_block() {
        assert_eq!(CaptureConfig::default().into_stored(), None);

        let capture = CaptureConfig::from_flags([false, false, false, true]);
        assert_eq!(capture.into_stored(), Some(capture));
    }

    #[test]
    fn test_effective_capture_defaults_when_absent() {
        assert_eq!(effective_capture(None), CaptureConfig::default());

        let stored = CaptureConfig::from_flags([true, false, false, false]);
        assert_eq!(effective_capture(Some(&stored)), stored);
    }

    #[test]
    fn test_captured_kinds() {
        assert!(CaptureDirection::default().captured_kinds().is_empty());
        assert_eq!(
            CaptureDirection::new(true, true).captured_kinds(),
            vec!["request", "response"]
        );
        assert_eq!(
            CaptureDirection::new(false, true).captured_kinds(),
            vec!["response"]
        );
    }

    #[test]
    fn test_deserialize_partial_block() {
        let capture: CaptureConfig =
            serde_json::from_str(r#"{"inbound":{"request":true}}"#).unwrap();
        assert_eq!(capture.flags(), [true, false, false, false]);
    }
}
