//! File loading for file-mode reviews

use revo_core::{Result, RevoError, SourceFile};
use std::path::Path;

/// Read each path as UTF-8, keeping argument order
pub async fn get_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SourceFile>> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RevoError::ReadInput {
                path: path.display().to_string(),
                source,
            })?;
        tracing::debug!("Read {} ({} chars)", path.display(), content.chars().count());
        files.push(SourceFile::new(path.display().to_string(), content));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("b.py");
        let second = dir.path().join("a.ts");
        std::fs::write(&first, "print('b')").unwrap();
        std::fs::write(&second, "export const a = 1;").unwrap();

        let files = get_files(&[&first, &second]).await.unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].path.ends_with("b.py"));
        assert_eq!(files[0].content, "print('b')");
        assert!(files[1].path.ends_with("a.ts"));
    }

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.js");

        let err = get_files(&[&missing]).await.unwrap_err();
        assert!(matches!(err, RevoError::ReadInput { .. }));
        assert!(err.to_string().contains("nope.js"));
    }

    #[tokio::test]
    async fn test_no_paths() {
        let paths: Vec<std::path::PathBuf> = Vec::new();
        assert!(get_files(&paths).await.unwrap().is_empty());
    }
}
