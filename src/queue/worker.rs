use chrono::Utc;
use std::time::Duration;

use crate::constants::{MAX_DELIVERY_ATTEMPTS, WORKER_NODE};
use crate::db::DocumentStore;
use crate::error::Result;
use crate::models::{ProcessingDetails, ProcessingMessage, ProcessingStatus};
use crate::AppState;

/// Queue worker loop: poll the processing queue at a fixed interval and
/// handle one delivery per poll. Spawned as a background task at startup.
pub async fn run(state: AppState) {
    tracing::info!(
        "Queue worker started (poll interval {}ms)",
        state.config.queue_poll_interval_ms
    );
    let mut ticker =
        tokio::time::interval(Duration::from_millis(state.config.queue_poll_interval_ms));
    loop {
        ticker.tick().await;
        if let Err(e) = process_next(&state).await {
            tracing::error!("Queue worker poll failed: {:?}", e);
        }
    }
}

/// Take one delivery off the queue and process it.
///
/// Delivery is at least once: a message whose processing fails is re-enqueued
/// until `MAX_DELIVERY_ATTEMPTS`, then dropped as poison. Malformed messages
/// are consumed immediately since redelivery cannot fix them. Returns whether
/// a delivery was handled.
pub async fn process_next(state: &AppState) -> Result<bool> {
    let Some(envelope) = state.queue.dequeue().await? else {
        return Ok(false);
    };

    let message = match ProcessingMessage::from_transport(&envelope.text) {
        Ok(message) => message,
        Err(e) => {
            tracing::error!("Discarding malformed queue message: {:?}", e);
            return Ok(true);
        }
    };

    if let Err(e) = process_message(&state.store, &message).await {
        if envelope.dequeue_count >= MAX_DELIVERY_ATTEMPTS {
            tracing::error!(
                "Dropping poison message for video {} after {} deliveries: {:?}",
                message.video_id,
                envelope.dequeue_count,
                e
            );
        } else {
            tracing::warn!(
                "Processing video {} failed (delivery {}), re-enqueueing: {:?}",
                message.video_id,
                envelope.dequeue_count,
                e
            );
            state.queue.requeue(envelope).await?;
        }
    }
    Ok(true)
}

/// Mark the video from a processing message as completed.
///
/// A message for a video that no longer exists is consumed without error.
/// Idempotent: re-marking a completed video just refreshes the stamps.
pub async fn process_message(store: &DocumentStore, message: &ProcessingMessage) -> Result<()> {
    tracing::info!(
        "Processing video {} (\"{}\") uploaded by {}",
        message.video_id,
        message.title,
        message.user_id
    );

    let Some(mut video) = store.find_video(&message.video_id).await? else {
        tracing::warn!("Video {} not found in database", message.video_id);
        return Ok(());
    };

    let now = Utc::now();
    video.processing_status = ProcessingStatus::Completed;
    video.processed_at = Some(now);
    video.processing_details = Some(ProcessingDetails {
        queue_processed: true,
        processed_timestamp: now,
        worker_node: WORKER_NODE.to_string(),
    });
    store.replace_video(video).await?;

    tracing::info!("Video {} processing completed", message.video_id);
    Ok(())
}
