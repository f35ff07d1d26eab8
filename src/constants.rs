/// Title given to uploads that arrive without one
pub const DEFAULT_TITLE: &str = "Untitled";

/// Owner recorded for uploads that arrive without a userId
pub const ANONYMOUS_USER_ID: &str = "anonymous";

/// Minimum accepted password length for registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Prefix of synthetic transcription ids issued in degraded mode,
/// when the speech API rejects or fails a submission
pub const DEMO_TRANSCRIPTION_PREFIX: &str = "demo-";

/// Transcript text returned for degraded-mode (demo) transcription jobs
pub const DEMO_TRANSCRIPT: &str = "This is a sample transcript generated for demonstration \
purposes. In a production environment, this would contain the actual speech-to-text \
transcription of the video audio content.";

/// Fallback text when a succeeded job yields no readable transcript file
pub const TRANSCRIPT_READY_FALLBACK: &str = "Transcript processing completed.";

/// Transcript text when the recognizer produced no phrases
pub const NO_SPEECH_DETECTED: &str = "No speech detected.";

/// Queue deliveries attempted before a message is dropped as poison
pub const MAX_DELIVERY_ATTEMPTS: u32 = 5;

/// Worker identifier stamped into processingDetails
pub const WORKER_NODE: &str = "videoshare-queue-worker";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message when the multipart payload has no video part
pub const ERR_NO_VIDEO_FILE: &str = "No video file provided";

/// Error message for registration with missing fields
pub const ERR_MISSING_REGISTER_FIELDS: &str = "Username, email and password are required";

/// Error message for registration with a too-short password
pub const ERR_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

/// Error message for login with missing fields
pub const ERR_MISSING_LOGIN_FIELDS: &str = "Email and password are required";

/// Error message for duplicate registration
pub const ERR_DUPLICATE_USER: &str = "Username or email already exists";
