use std::path::{Path, PathBuf};

use anyhow::Context;
use uuid::Uuid;

/// Subdirectory (and stored-path prefix) for article images.
const IMAGE_SUBDIR: &str = "news_images";

/// Writes uploaded images under the configured media directory.
///
/// Files are renamed to a generated UUID with a sanitized extension, so
/// client-supplied names never touch the filesystem. The returned path is
/// relative to the media root and is what gets stored on the article.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub async fn save_image(&self, original_name: &str, data: &[u8]) -> anyhow::Result<String> {
        let extension = sanitize_extension(original_name);
        let relative = format!("{}/{}.{}", IMAGE_SUBDIR, Uuid::new_v4(), extension);
        let path = self.root.join(&relative);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(relative)
    }
}

/// Lowercased ASCII-alphanumeric extension from the client file name,
/// or "bin" when there isn't a usable one.
fn sanitize_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ext.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .take(8)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, MediaStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_save_image_writes_file() {
        let (dir, store) = test_store();

        let path = store.save_image("photo.jpg", b"fake image data").await.unwrap();

        let on_disk = dir.path().join(&path);
        assert!(on_disk.exists());
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"fake image data");
    }

    #[tokio::test]
    async fn test_saved_path_is_under_image_subdir() {
        let (_dir, store) = test_store();

        let path = store.save_image("photo.jpg", b"data").await.unwrap();

        assert!(path.starts_with("news_images/"));
        assert!(path.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_saved_paths_are_unique() {
        let (_dir, store) = test_store();

        let first = store.save_image("photo.jpg", b"one").await.unwrap();
        let second = store.save_image("photo.jpg", b"two").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_extension_is_lowercased() {
        let (_dir, store) = test_store();

        let path = store.save_image("SHOUTY.PNG", b"data").await.unwrap();

        assert!(path.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_missing_extension_falls_back_to_bin() {
        let (_dir, store) = test_store();

        let path = store.save_image("no-extension", b"data").await.unwrap();

        assert!(path.ends_with(".bin"));
    }

    #[tokio::test]
    async fn test_hostile_extension_is_sanitized() {
        let (dir, store) = test_store();

        let path = store.save_image("evil.j%p/g", b"data").await.unwrap();

        // Stays inside the media root regardless of the client name
        let on_disk = dir.path().join(&path);
        assert!(on_disk.starts_with(dir.path()));
        assert!(path.starts_with("news_images/"));
    }

    #[test]
    fn test_sanitize_extension() {
        assert_eq!(sanitize_extension("a.jpg"), "jpg");
        assert_eq!(sanitize_extension("a.JPEG"), "jpeg");
        assert_eq!(sanitize_extension("archive.tar.gz"), "gz");
        assert_eq!(sanitize_extension("noext"), "bin");
        assert_eq!(sanitize_extension(".hidden"), "bin");
        assert_eq!(sanitize_extension("a.!!!"), "bin");
        assert_eq!(sanitize_extension("a.veryverylongextension"), "veryvery");
    }
}
