pub mod worker;

use redb::{ReadableTable, ReadableTableMetadata};
use serde::{Deserialize, Serialize};

use crate::db::{tables, Db};
use crate::error::Result;
use crate::models::ProcessingMessage;

/// Envelope persisted on the queue. `text` is the transport-encoded message
/// (base64 JSON); `dequeue_count` tracks deliveries so poison messages can be
/// dropped after repeated failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEnvelope {
    pub text: String,
    pub dequeue_count: u32,
}

/// Client for the embedded processing queue.
///
/// FIFO over a redb table keyed by sequence number. Delivery is at least
/// once: a message that fails processing is re-enqueued by the worker, so
/// consumers must be idempotent.
#[derive(Clone)]
pub struct QueueClient {
    db: Db,
}

impl QueueClient {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Enqueue a processing message, transport-encoded as base64 JSON
    pub async fn enqueue(&self, message: &ProcessingMessage) -> Result<()> {
        let envelope = QueueEnvelope {
            text: message.to_transport()?,
            dequeue_count: 0,
        };
        self.push(envelope).await
    }

    /// Put a previously dequeued envelope back for redelivery
    pub async fn requeue(&self, envelope: QueueEnvelope) -> Result<()> {
        self.push(envelope).await
    }

    /// Pop the oldest envelope, if any. The returned envelope's
    /// `dequeue_count` already includes this delivery.
    pub async fn dequeue(&self) -> Result<Option<QueueEnvelope>> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<Option<QueueEnvelope>> {
            let write_txn = db.begin_write()?;
            let popped = {
                let mut table = write_txn.open_table(tables::QUEUE)?;
                // The popped guards must drop before the table does.
                let entry = table.pop_first()?;
                match entry {
                    Some((_seq, value)) => {
                        let mut envelope: QueueEnvelope = serde_json::from_str(value.value())?;
                        envelope.dequeue_count += 1;
                        Some(envelope)
                    }
                    None => None,
                }
            };
            write_txn.commit()?;
            Ok(popped)
        })
        .await?
    }

    /// Number of messages currently waiting
    pub async fn len(&self) -> Result<u64> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<u64> {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(tables::QUEUE)?;
            Ok(table.len()?)
        })
        .await?
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    async fn push(&self, envelope: QueueEnvelope) -> Result<()> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(tables::QUEUE)?;
                let next_seq = table.last()?.map(|(seq, _)| seq.value() + 1).unwrap_or(0);
                let json = serde_json::to_string(&envelope)?;
                table.insert(next_seq, json.as_str())?;
            }
            write_txn.commit()?;
            Ok(())
        })
        .await?
    }
}
