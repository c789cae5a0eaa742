/// Saving the processed output to disk
use bytes::Bytes;
use rfd::FileDialog;
use std::path::PathBuf;

/// Ask where to save the output, starting in the user's download folder
pub fn choose_download_path(suggested_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Output Image")
        .set_file_name(suggested_name);

    if let Some(dir) = dirs::download_dir().or_else(dirs::home_dir) {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}

/// Write the artifact bytes and return where they went
pub async fn save_artifact(path: PathBuf, bytes: Bytes) -> Result<PathBuf, String> {
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::DOWNLOAD_NAME;

    #[tokio::test]
    async fn test_save_artifact_writes_bytes() {
        let path = std::env::temp_dir().join(format!("pixelmorph-{}-{}", std::process::id(), DOWNLOAD_NAME));

        let saved = save_artifact(path.clone(), Bytes::from_static(b"\xff\xd8\xff\xd9"))
            .await
            .unwrap();
        assert_eq!(saved, path);
        assert_eq!(std::fs::read(&path).unwrap(), b"\xff\xd8\xff\xd9");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_save_artifact_reports_bad_directory() {
        let path = std::env::temp_dir()
            .join("pixelmorph-missing-dir")
            .join(DOWNLOAD_NAME);

        let err = save_artifact(path, Bytes::from_static(b"x")).await.unwrap_err();
        assert!(err.starts_with("Failed to write"));
    }
}
