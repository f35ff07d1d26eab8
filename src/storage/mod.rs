use std::io;
use std::path::PathBuf;

/// Filesystem-backed blob store.
///
/// Blobs are flat files under a single root directory, addressed by name and
/// served back over HTTP at `{public_base_url}/blobs/{name}`.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl BlobStore {
    /// Create the store, ensuring the root directory exists
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Derive a flat blob name from a video id and the original filename.
    /// Any path components in the client-supplied filename are stripped.
    pub fn blob_name(video_id: &str, filename: &str) -> String {
        let base = filename
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("video");
        format!("{video_id}-{base}")
    }

    /// Retrieval URL for a blob
    pub fn url(&self, name: &str) -> String {
        format!("{}/blobs/{}", self.public_base_url, name)
    }

    /// Upload raw bytes under the given name, overwriting any existing blob
    pub async fn put(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(self.root.join(name), bytes).await
    }

    /// Delete a blob if it exists. Returns whether anything was deleted;
    /// an already-missing blob is not an error.
    pub async fn delete_if_exists(&self, name: &str) -> io::Result<bool> {
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Whether a blob with the given name currently exists
    pub async fn exists(&self, name: &str) -> bool {
        tokio::fs::try_exists(self.root.join(name))
            .await
            .unwrap_or(false)
    }
}
