use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post-upload pipeline state, advanced by the queue worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Queued,
    Completed,
}

/// Transcription workflow state. Transitions only move forward:
/// `not_started -> processing -> {completed | failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptionStatus {
    NotStarted,
    Processing,
    Completed,
    Failed,
}

/// Sub-record attached by the queue worker when processing completes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingDetails {
    pub queue_processed: bool,
    pub processed_timestamp: DateTime<Utc>,
    pub worker_node: String,
}

/// Like endpoint action; anything other than an explicit `unlike` counts as a like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    pub fn parse(action: Option<&str>) -> Self {
        match action {
            Some("unlike") => LikeAction::Unlike,
            _ => LikeAction::Like,
        }
    }
}

/// Video catalog entry stored in the document container.
///
/// `user_id` is the partition key; every point read/replace/delete of the
/// record must present it together with `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Partition key (owning user)
    pub user_id: String,
    pub video_url: String,
    pub blob_name: String,
    pub content_type: String,
    pub size: u64,
    pub upload_date: DateTime<Utc>,
    pub views: u64,
    pub likes: u64,
    pub processing_status: ProcessingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription_id: Option<String>,
    #[serde(default = "TranscriptionStatus::not_started")]
    pub transcription_status: TranscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_details: Option<ProcessingDetails>,
}

impl TranscriptionStatus {
    fn not_started() -> Self {
        TranscriptionStatus::NotStarted
    }
}

impl Video {
    /// Build a freshly uploaded record: zero views and likes, queued for processing
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        title: String,
        description: String,
        category: Option<String>,
        user_id: String,
        video_url: String,
        blob_name: String,
        content_type: String,
        size: u64,
        upload_date: DateTime<Utc>,
    ) -> Self {
        Video {
            id,
            title,
            description,
            category,
            user_id,
            video_url,
            blob_name,
            content_type,
            size,
            upload_date,
            views: 0,
            likes: 0,
            processing_status: ProcessingStatus::Queued,
            transcription_id: None,
            transcription_status: TranscriptionStatus::NotStarted,
            transcript: None,
            processed_at: None,
            processing_details: None,
        }
    }

    /// Count a single fetch of this video. Views only ever go up.
    pub fn record_view(&mut self) {
        self.views += 1;
    }

    /// Apply a like or unlike, flooring the count at zero
    pub fn apply_like(&mut self, action: LikeAction) -> u64 {
        match action {
            LikeAction::Like => self.likes += 1,
            LikeAction::Unlike => self.likes = self.likes.saturating_sub(1),
        }
        self.likes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video() -> Video {
        Video::new(
            "7d9f3a60-0000-0000-0000-000000000000".to_string(),
            "Demo".to_string(),
            "A demo clip".to_string(),
            None,
            "user-1".to_string(),
            "http://localhost:8080/blobs/7d9f3a60-demo.mp4".to_string(),
            "7d9f3a60-demo.mp4".to_string(),
            "video/mp4".to_string(),
            1024,
            Utc::now(),
        )
    }

    #[test]
    fn test_new_video_starts_queued_with_zero_counters() {
        let video = sample_video();
        assert_eq!(video.views, 0);
        assert_eq!(video.likes, 0);
        assert_eq!(video.processing_status, ProcessingStatus::Queued);
        assert_eq!(video.transcription_status, TranscriptionStatus::NotStarted);
    }

    #[test]
    fn test_like_then_unlike_restores_count() {
        let mut video = sample_video();
        assert_eq!(video.apply_like(LikeAction::Like), 1);
        assert_eq!(video.apply_like(LikeAction::Unlike), 0);
    }

    #[test]
    fn test_unlike_at_zero_is_a_noop() {
        let mut video = sample_video();
        assert_eq!(video.apply_like(LikeAction::Unlike), 0);
        assert_eq!(video.likes, 0);
    }

    #[test]
    fn test_like_action_defaults_to_like() {
        assert_eq!(LikeAction::parse(None), LikeAction::Like);
        assert_eq!(LikeAction::parse(Some("like")), LikeAction::Like);
        assert_eq!(LikeAction::parse(Some("unlike")), LikeAction::Unlike);
        assert_eq!(LikeAction::parse(Some("dislike")), LikeAction::Like);
    }

    #[test]
    fn test_serialized_shape_uses_camel_case_and_omits_unset_fields() {
        let video = sample_video();
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["processingStatus"], "queued");
        assert_eq!(json["transcriptionStatus"], "not_started");
        assert!(json.get("uploadDate").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("transcriptionId").is_none());
        assert!(json.get("transcript").is_none());
        assert!(json.get("processedAt").is_none());
    }

    #[test]
    fn test_deserializes_records_written_before_transcription_fields_existed() {
        // Old records carry neither transcription fields nor category.
        let json = serde_json::json!({
            "id": "v1",
            "title": "Old",
            "description": "",
            "userId": "user-1",
            "videoUrl": "http://localhost/blobs/v1-old.mp4",
            "blobName": "v1-old.mp4",
            "contentType": "video/mp4",
            "size": 1,
            "uploadDate": "2024-01-01T00:00:00Z",
            "views": 3,
            "likes": 1,
            "processingStatus": "completed"
        });
        let video: Video = serde_json::from_value(json).unwrap();
        assert_eq!(video.transcription_status, TranscriptionStatus::NotStarted);
        assert!(video.transcription_id.is_none());
    }
}
