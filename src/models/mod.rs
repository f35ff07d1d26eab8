pub mod queue;
pub mod user;
pub mod video;

pub use queue::ProcessingMessage;
pub use user::{PublicUser, User};
pub use video::{LikeAction, ProcessingDetails, ProcessingStatus, TranscriptionStatus, Video};

use serde::{Deserialize, Serialize};

/// A record in the shared document container.
///
/// Users and videos live side by side, distinguished by a `type` field in the
/// stored JSON, the way a schemaless document container with a single
/// collection would hold them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Document {
    User(User),
    Video(Video),
}
