//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Breakdown system instructions (with granularity conditionals)
pub const BREAKDOWN_SYSTEM: &str = include_str!("../../prompts/breakdown-system.pmt");

/// Breakdown user prompt with the one-shot example plan
pub const BREAKDOWN_USER: &str = include_str!("../../prompts/breakdown-user.pmt");

/// Emotion classifier instructions
pub const EMOTION_CLASSIFY: &str = include_str!("../../prompts/emotion-classify.pmt");

/// Acknowledgment instructions for positive input
pub const ACK_POSITIVE: &str = include_str!("../../prompts/ack-positive.pmt");

/// Acknowledgment instructions for negative input
pub const ACK_NEGATIVE: &str = include_str!("../../prompts/ack-negative.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "breakdown-system" => Some(BREAKDOWN_SYSTEM),
        "breakdown-user" => Some(BREAKDOWN_USER),
        "emotion-classify" => Some(EMOTION_CLASSIFY),
        "ack-positive" => Some(ACK_POSITIVE),
        "ack-negative" => Some(ACK_NEGATIVE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_breakdown() {
        let system = get_embedded("breakdown-system").unwrap();
        assert!(system.contains("productivity coach"));
        assert!(system.contains("single JSON object"));
        assert!(system.contains("Activation Hack"));

        let user = get_embedded("breakdown-user").unwrap();
        assert!(user.contains("```json"));
        assert!(user.contains("Buy Spectacles"));
    }

    #[test]
    fn test_get_embedded_coach_prompts() {
        assert!(get_embedded("emotion-classify").unwrap().contains("emotion detector"));
        assert!(get_embedded("ack-positive").unwrap().contains("enthusiastic coach"));
        assert!(get_embedded("ack-negative").unwrap().contains("empathetic coach"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
