//! In-flight messages.

use crate::model::{Trigger, TriggerCombine};

/// One in-flight message. The second generation persists `color` as a leading
/// '1'..'3' digit on the message text; later generations use a separate byte.
/// The codec strips and re-injects the digit, so `text` here never carries it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    pub text: String,
    /// 0 = default color, 1..=3 = highlight colors.
    pub color: u8,
    /// Bitmask of teams the message is shown to. Third generation onward.
    pub sent_to_teams: u8,
    pub triggers: [Trigger; 4],
    pub combine: TriggerCombine,
    pub delay_seconds: u16,
}

impl Message {
    pub fn with_text(text: impl Into<String>) -> Self {
        Message { text: text.into(), sent_to_teams: 1, ..Message::default() }
    }
}
