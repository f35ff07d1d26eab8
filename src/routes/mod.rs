pub mod auth;
pub mod health;
pub mod transcription;
pub mod videos;

pub use auth::{login_user, register_user};
pub use health::health_check;
pub use transcription::{get_transcription, transcribe_video};
pub use videos::{delete_video, get_video, like_video, list_videos, upload_video};
