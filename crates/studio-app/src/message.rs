//! Message types for the capture view (TEA pattern)

/// All messages the capture view reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Flip a capture slider (`inboundRequest`, `outboundResponse`, ...)
    ToggleCapture { name: String },

    /// Persist the edited capture settings
    SubmitCapture,

    /// Discard edits and re-render from the stored model
    CancelCapture,
}
