use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::AppError;

/// Namespace under which pending privacy updates are buffered for a request.
pub const BUFFER_NAMESPACE: &str = "user_field_privacy";

pub fn project_dirs() -> Result<ProjectDirs, AppError> {
    ProjectDirs::from("", "user-field-privacy", "user-field-privacy")
        .ok_or_else(|| AppError::Config("Could not determine home directory".into()))
}

pub fn db_path() -> anyhow::Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("user-field-privacy.db"))
}

/// Resolve the database path, preferring an explicit override.
pub fn resolve_db_path(override_path: Option<&str>) -> anyhow::Result<PathBuf> {
    match override_path {
        Some(p) => {
            let path = PathBuf::from(p);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            Ok(path)
        }
        None => db_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_db_path_override() {
        let dir = std::env::temp_dir().join(format!("ufp-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("flags.db");

        let resolved = resolve_db_path(path.to_str()).unwrap();

        assert_eq!(resolved, path);
        assert!(dir.join("nested").is_dir());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_resolve_db_path_bare_filename() {
        let resolved = resolve_db_path(Some("flags.db")).unwrap();
        assert_eq!(resolved, PathBuf::from("flags.db"));
    }
}
