use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::constants::{ANONYMOUS_USER_ID, DEFAULT_TITLE, ERR_NO_VIDEO_FILE};
use crate::error::{AppError, Result};
use crate::models::{LikeAction, ProcessingMessage, Video};
use crate::storage::BlobStore;
use crate::AppState;

/// List the whole catalog, newest upload first.
///
/// No server-side filtering or pagination; search and category filters are
/// applied client-side over this list.
pub async fn list_videos(State(state): State<AppState>) -> Result<Json<Vec<Video>>> {
    Ok(Json(state.store.list_videos().await?))
}

/// Fetch a single video, counting the view.
///
/// Every fetch is a write: the view counter is incremented and persisted
/// before the record is returned. The increment is read-then-replace, so
/// concurrent fetches of the same video can undercount.
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Video>> {
    let mut video = state
        .store
        .find_video(&id)
        .await?
        .ok_or(AppError::VideoNotFound)?;

    video.record_view();
    state.store.replace_video(video.clone()).await?;

    Ok(Json(video))
}

/// Upload a video (multipart: video, title, description, category, userId)
///
/// Writes the blob first, then the catalog record, then enqueues the
/// processing message. A blob failure propagates before any record exists;
/// there is no compensating cleanup for later failures.
pub async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Video>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut category: Option<String> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("video") => {
                let filename = field.file_name().unwrap_or("video").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;
                file = Some((filename, content_type, data.to_vec()));
            }
            Some("title") => title = Some(field.text().await?),
            Some("description") => description = Some(field.text().await?),
            Some("category") => category = Some(field.text().await?),
            Some("userId") => user_id = Some(field.text().await?),
            _ => {}
        }
    }

    let Some((filename, content_type, data)) = file else {
        return Err(AppError::InvalidInput(ERR_NO_VIDEO_FILE.to_string()));
    };

    let title = title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = description.unwrap_or_default();
    let category = category.filter(|c| !c.trim().is_empty());
    let user_id = user_id
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string());

    let video_id = Uuid::new_v4().to_string();
    let blob_name = BlobStore::blob_name(&video_id, &filename);
    let size = data.len() as u64;
    let now = Utc::now();

    state.blobs.put(&blob_name, &data).await?;

    let video = Video::new(
        video_id.clone(),
        title.clone(),
        description,
        category,
        user_id.clone(),
        state.blobs.url(&blob_name),
        blob_name.clone(),
        content_type,
        size,
        now,
    );
    state.store.create_video(video.clone()).await?;

    let message = ProcessingMessage {
        video_id: video_id.clone(),
        title,
        user_id,
        blob_name,
        timestamp: now,
    };
    state.queue.enqueue(&message).await?;

    tracing::info!("Video {} queued for processing", video_id);

    Ok((StatusCode::CREATED, Json(video)))
}

/// Delete a video and its blob.
///
/// Blob first (delete-if-exists, tolerant of an already-missing blob), then
/// the document. A document-delete failure after the blob is gone leaves an
/// orphaned record; no rollback is attempted.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let video = state
        .store
        .find_video(&id)
        .await?
        .ok_or(AppError::VideoNotFound)?;

    state.blobs.delete_if_exists(&video.blob_name).await?;
    state.store.delete_video(&video.id, &video.user_id).await?;

    tracing::info!("Video {} deleted", id);

    Ok(Json(json!({
        "message": "Video deleted successfully",
        "id": id,
    })))
}

#[derive(Debug, Default, Deserialize)]
pub struct LikeRequest {
    pub action: Option<String>,
}

/// Like or unlike a video; a missing or unrecognized action counts as a like.
///
/// There is no notion of who liked: the count just moves. Per-user
/// deduplication is a client-side localStorage heuristic only.
pub async fn like_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<LikeRequest>>,
) -> Result<Json<Value>> {
    let action = LikeAction::parse(
        body.as_ref()
            .and_then(|Json(req)| req.action.as_deref()),
    );

    let mut video = state
        .store
        .find_video(&id)
        .await?
        .ok_or(AppError::VideoNotFound)?;

    let likes = video.apply_like(action);
    state.store.replace_video(video).await?;

    Ok(Json(json!({
        "likes": likes,
        "message": match action {
            LikeAction::Like => "Video liked!",
            LikeAction::Unlike => "Video unliked",
        },
    })))
}
