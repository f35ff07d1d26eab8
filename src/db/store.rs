use redb::ReadableTable;

use crate::db::{tables, Db};
use crate::error::{AppError, Result};
use crate::models::{Document, User, Video};

/// Client for the shared document container.
///
/// Explicitly constructed once at startup and cloned into each handler via
/// application state; there are no ambient connection globals. All redb work
/// runs on the blocking pool.
///
/// Point operations (create/replace/delete) address a record by
/// (partition key, id); lookups by id alone are cross-partition scans, the
/// same access pattern the catalog has always used. Mutations are
/// read-then-replace with no version check, so concurrent writers to the
/// same record can lose an update; `replace_video` is the single place a
/// conditional replace would slot in.
#[derive(Clone)]
pub struct DocumentStore {
    db: Db,
}

impl DocumentStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create a user document. Fails if the key is already taken.
    pub async fn create_user(&self, user: User) -> Result<()> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(tables::DOCUMENTS)?;
                let key = (user.user_id.as_str(), user.id.as_str());
                if table.get(key)?.is_some() {
                    return Err(AppError::Conflict("User already exists".to_string()));
                }
                let bytes = serde_json::to_vec(&Document::User(user.clone()))?;
                table.insert(key, bytes.as_slice())?;
            }
            write_txn.commit()?;
            Ok(())
        })
        .await?
    }

    /// Find a user by (lower-cased) email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_lowercase();
        let users = self.scan_users().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// Whether a user with the given username or email already exists
    /// (case-insensitive on both)
    pub async fn user_exists(&self, username: &str, email: &str) -> Result<bool> {
        let username = username.to_lowercase();
        let email = email.to_lowercase();
        let users = self.scan_users().await?;
        Ok(users
            .iter()
            .any(|u| u.username.to_lowercase() == username || u.email == email))
    }

    /// Create a video document. Fails if the key is already taken.
    pub async fn create_video(&self, video: Video) -> Result<()> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(tables::DOCUMENTS)?;
                let key = (video.user_id.as_str(), video.id.as_str());
                if table.get(key)?.is_some() {
                    return Err(AppError::Conflict("Video id already exists".to_string()));
                }
                let bytes = serde_json::to_vec(&Document::Video(video.clone()))?;
                table.insert(key, bytes.as_slice())?;
            }
            write_txn.commit()?;
            Ok(())
        })
        .await?
    }

    /// Find a video by id, scanning across partitions
    pub async fn find_video(&self, id: &str) -> Result<Option<Video>> {
        let id = id.to_string();
        let docs = self.scan_documents().await?;
        Ok(docs.into_iter().find_map(|doc| match doc {
            Document::Video(v) if v.id == id => Some(v),
            _ => None,
        }))
    }

    /// Replace a video record in place, addressed by its (partition key, id).
    ///
    /// Every mutate-in-place path (view counts, likes, processing and
    /// transcription updates) funnels through here.
    pub async fn replace_video(&self, video: Video) -> Result<()> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(tables::DOCUMENTS)?;
                let key = (video.user_id.as_str(), video.id.as_str());
                if table.get(key)?.is_none() {
                    return Err(AppError::VideoNotFound);
                }
                let bytes = serde_json::to_vec(&Document::Video(video.clone()))?;
                table.insert(key, bytes.as_slice())?;
            }
            write_txn.commit()?;
            Ok(())
        })
        .await?
    }

    /// Delete a video document by (partition key, id)
    pub async fn delete_video(&self, id: &str, user_id: &str) -> Result<()> {
        let db = self.db.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(tables::DOCUMENTS)?;
                if table.remove((user_id.as_str(), id.as_str()))?.is_none() {
                    return Err(AppError::VideoNotFound);
                }
            }
            write_txn.commit()?;
            Ok(())
        })
        .await?
    }

    /// All videos, newest upload first
    pub async fn list_videos(&self) -> Result<Vec<Video>> {
        let docs = self.scan_documents().await?;
        let mut videos: Vec<Video> = docs
            .into_iter()
            .filter_map(|doc| match doc {
                Document::Video(v) => Some(v),
                Document::User(_) => None,
            })
            .collect();
        videos.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        Ok(videos)
    }

    /// Read connectivity probe used by the health endpoint
    pub async fn ping(&self) -> bool {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.begin_read().is_ok())
            .await
            .unwrap_or(false)
    }

    /// Full scan of the document container
    async fn scan_documents(&self) -> Result<Vec<Document>> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<Document>> {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(tables::DOCUMENTS)?;
            let mut docs = Vec::new();
            for entry in table.iter()? {
                let (key, value) = entry?;
                match serde_json::from_slice(value.value()) {
                    Ok(doc) => docs.push(doc),
                    Err(e) => {
                        // An undecodable document is skipped, not fatal; point
                        // operations on it still work by key.
                        let (pk, id) = key.value();
                        tracing::warn!("Skipping undecodable document {}/{}: {}", pk, id, e);
                    }
                }
            }
            Ok(docs)
        })
        .await?
    }

    async fn scan_users(&self) -> Result<Vec<User>> {
        let docs = self.scan_documents().await?;
        Ok(docs
            .into_iter()
            .filter_map(|doc| match doc {
                Document::User(u) => Some(u),
                Document::Video(_) => None,
            })
            .collect())
    }
}
