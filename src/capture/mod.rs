//! Capture hand-off
//!
//! Builds what the extension sends to the capture server when the user
//! captures a selection or clicks the check button on a highlighted word.

pub mod payload;
pub mod protocol;

pub use payload::{
    is_word_element, note_for_node, word_selection, CapturePayload, CaptureSettings, CapturedSelection,
    PageContext, SourceUpload,
};
pub use protocol::{parse_protocols, select_protocol, CaptureFormat, ProtocolSetting};
