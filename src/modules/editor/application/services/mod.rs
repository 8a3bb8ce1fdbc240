mod attachment_bridge;
mod editing_session;

pub use attachment_bridge::AttachmentBridge;
pub use editing_session::{EditingSession, EditingSessionError};
