use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::config::UploadConfig;

/// Blob storage seam for uploaded images. The local implementation
/// writes under the configured uploads directory; swapping in a hosted
/// provider only means another implementation of this trait.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores the bytes and returns the public URL they are served from.
    async fn upload(&self, original_name: &str, bytes: Vec<u8>) -> Result<String>;

    async fn delete(&self, url: &str) -> Result<()>;
}

pub struct LocalBlobStore {
    config: UploadConfig,
}

impl LocalBlobStore {
    #[must_use]
    pub const fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        PathBuf::from(&self.config.path).join(filename)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, original_name: &str, bytes: Vec<u8>) -> Result<String> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");

        let filename = format!("{}.{}", random_name(), extension);

        let uploads_dir = PathBuf::from(&self.config.path);
        if !uploads_dir.exists() {
            fs::create_dir_all(&uploads_dir).await?;
        }

        let file_path = self.path_for(&filename);

        fs::write(&file_path, bytes)
            .await
            .with_context(|| format!("Failed to write upload to {}", file_path.display()))?;

        info!(path = %file_path.display(), "Stored uploaded file");

        Ok(format!(
            "{}/{}",
            self.config.public_base.trim_end_matches('/'),
            filename
        ))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let prefix = format!("{}/", self.config.public_base.trim_end_matches('/'));
        let Some(filename) = url.strip_prefix(&prefix) else {
            anyhow::bail!("URL {url} is not served from this blob store");
        };

        // The public name is generated by upload(); reject anything that
        // could escape the uploads directory.
        if filename.contains('/') || filename.contains("..") {
            anyhow::bail!("Invalid blob name: {filename}");
        }

        fs::remove_file(self.path_for(filename))
            .await
            .with_context(|| format!("Failed to delete blob {filename}"))?;

        Ok(())
    }
}

/// Random 32-char hex name.
fn random_name() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();

    bytes.iter().fold(String::with_capacity(32), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
