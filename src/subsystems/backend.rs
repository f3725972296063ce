//! Backend subsystems.

use crate::error::SubsystemError;
use actor_framework::Actor;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Serves music from a local directory.
pub struct LocalBackend {
    media_dir: Option<PathBuf>,
}

impl LocalBackend {
    pub fn new(media_dir: Option<PathBuf>) -> Self {
        Self { media_dir }
    }
}

#[async_trait]
impl Actor for LocalBackend {
    type Error = SubsystemError;

    fn name(&self) -> String {
        "local-backend".to_string()
    }

    async fn on_start(&mut self) -> Result<(), SubsystemError> {
        match &self.media_dir {
            Some(dir) => {
                let metadata = tokio::fs::metadata(dir).await.map_err(|e| {
                    SubsystemError::Failed(format!("media_dir {}: {e}", dir.display()))
                })?;
                if !metadata.is_dir() {
                    return Err(SubsystemError::Failed(format!(
                        "media_dir {} is not a directory",
                        dir.display()
                    )));
                }
                info!(media_dir = %dir.display(), "Local library available");
            }
            None => info!("No media_dir configured, local library is empty"),
        }
        Ok(())
    }
}

/// Backend with an empty library.
pub struct DummyBackend;

#[async_trait]
impl Actor for DummyBackend {
    type Error = SubsystemError;

    fn name(&self) -> String {
        "dummy-backend".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_media_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        let mut backend = LocalBackend::new(Some(temp.path().join("missing")));
        let err = backend.on_start().await.unwrap_err();
        assert!(matches!(err, SubsystemError::Failed(_)));
    }

    #[tokio::test]
    async fn test_existing_media_dir_starts() {
        let temp = tempfile::tempdir().unwrap();
        let mut backend = LocalBackend::new(Some(temp.path().to_path_buf()));
        backend.on_start().await.unwrap();
    }
}
