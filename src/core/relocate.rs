//! Relocate - move both permanent backups into another directory
//!
//! Validates the target directory and both source files before touching
//! anything. If the log move fails after the data move, the data file is
//! moved back. The two backups never end up sharing one path: when their
//! file names clash in the target directory the standard names are used.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::activity::LOG_FILE_NAME;
use super::data::DATA_FILE_NAME;
use super::error::{RecordsError, Result};
use crate::config::Config;

/// Move the permanent files into `new_dir` and return the updated config.
///
/// The caller is responsible for persisting the returned config.
pub fn relocate_backups(config: &Config, new_dir: &Path) -> Result<Config> {
    if !new_dir.is_dir() {
        return Err(RecordsError::NotADirectory(new_dir.to_path_buf()));
    }
    check_writable(new_dir)?;

    let old_data = &config.permanent_backup_location;
    let old_log = &config.permanent_log_location_dir;
    for (what, path) in [
        ("permanent data file", old_data),
        ("permanent log file", old_log),
    ] {
        if !path.exists() {
            return Err(RecordsError::NotFound {
                what,
                path: path.clone(),
            });
        }
    }

    let (new_data, new_log) = targets(new_dir, old_data, old_log);

    move_file(old_data, &new_data)
        .map_err(|e| RecordsError::io("permanent data file", old_data, e))?;
    info!(to = %new_data.display(), "moved permanent data file");

    if let Err(err) = move_file(old_log, &new_log) {
        warn!(error = %err, "moving permanent log failed, moving data file back");
        return match move_file(&new_data, old_data) {
            Ok(()) => Err(RecordsError::RelocationRolledBack {
                restored: old_data.clone(),
                source: err,
            }),
            Err(_) => Err(RecordsError::PartialRelocation {
                data: new_data,
                log: old_log.clone(),
            }),
        };
    }
    info!(to = %new_log.display(), "moved permanent log file");

    Ok(config.with_permanent(new_data, new_log))
}

/// Create and drop a scratch file; permission bits alone do not say
/// whether this process can write into the directory.
fn check_writable(dir: &Path) -> Result<()> {
    match tempfile::NamedTempFile::new_in(dir) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            Err(RecordsError::ReadOnlyDirectory(dir.to_path_buf()))
        }
        Err(err) => Err(RecordsError::io("backup directory", dir, err)),
    }
}

fn targets(dir: &Path, old_data: &Path, old_log: &Path) -> (PathBuf, PathBuf) {
    let data = target(dir, old_data, DATA_FILE_NAME);
    let log = target(dir, old_log, LOG_FILE_NAME);
    if data == log || data == old_log {
        warn!(
            path = %data.display(),
            "backup file names clash in the target directory, using standard names"
        );
        return (dir.join(DATA_FILE_NAME), dir.join(LOG_FILE_NAME));
    }
    (data, log)
}

fn target(dir: &Path, current: &Path, fallback: &str) -> PathBuf {
    let name = current
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| fallback.into());
    dir.join(name)
}

/// Rename, falling back to copy + delete across filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if from == to {
        return Ok(());
    }
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (TempDir, Config) {
        let dir = tempdir().unwrap();
        let old = dir.path().join("old");
        fs::create_dir_all(&old).unwrap();
        let config = Config::default()
            .with_permanent(old.join(DATA_FILE_NAME), old.join(LOG_FILE_NAME));
        fs::write(&config.permanent_backup_location, "x: 1, a\n").unwrap();
        fs::write(&config.permanent_log_location_dir, "[1]: a --> x\n").unwrap();
        (dir, config)
    }

    #[test]
    fn test_relocate_moves_both_files() -> Result<()> {
        let (dir, config) = setup();
        let new_dir = dir.path().join("new");
        fs::create_dir_all(&new_dir).unwrap();

        let moved = relocate_backups(&config, &new_dir)?;
        assert_eq!(moved.permanent_backup_location, new_dir.join(DATA_FILE_NAME));
        assert_eq!(moved.permanent_log_location_dir, new_dir.join(LOG_FILE_NAME));
        assert!(moved.permanent_backup_location.exists());
        assert!(moved.permanent_log_location_dir.exists());
        assert!(!config.permanent_backup_location.exists());
        assert!(!config.permanent_log_location_dir.exists());
        Ok(())
    }

    #[test]
    fn test_relocate_rejects_missing_directory() {
        let (dir, config) = setup();
        let err = relocate_backups(&config, &dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, RecordsError::NotADirectory(_)));
        assert!(config.permanent_backup_location.exists());
    }

    #[test]
    fn test_relocate_aborts_when_log_missing() {
        let (dir, config) = setup();
        fs::remove_file(&config.permanent_log_location_dir).unwrap();
        let new_dir = dir.path().join("new");
        fs::create_dir_all(&new_dir).unwrap();

        let err = relocate_backups(&config, &new_dir).unwrap_err();
        assert!(matches!(
            err,
            RecordsError::NotFound {
                what: "permanent log file",
                ..
            }
        ));
        assert!(config.permanent_backup_location.exists());
        assert!(!new_dir.join(DATA_FILE_NAME).exists());
    }

    #[test]
    fn test_relocate_same_file_names_keep_both() -> Result<()> {
        let dir = tempdir().unwrap();
        let (a, b) = (dir.path().join("a"), dir.path().join("b"));
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        let config =
            Config::default().with_permanent(a.join("records.txt"), b.join("records.txt"));
        fs::write(&config.permanent_backup_location, "x: 1, a\n").unwrap();
        fs::write(&config.permanent_log_location_dir, "[1]: a --> x\n").unwrap();
        let new_dir = dir.path().join("new");
        fs::create_dir_all(&new_dir).unwrap();

        let moved = relocate_backups(&config, &new_dir)?;
        assert_ne!(moved.permanent_backup_location, moved.permanent_log_location_dir);
        assert_eq!(
            fs::read_to_string(&moved.permanent_backup_location).unwrap(),
            "x: 1, a\n"
        );
        assert_eq!(
            fs::read_to_string(&moved.permanent_log_location_dir).unwrap(),
            "[1]: a --> x\n"
        );
        Ok(())
    }

    #[test]
    fn test_relocate_rolls_back_data_when_log_move_fails() {
        let (dir, config) = setup();
        let new_dir = dir.path().join("new");
        // A non-empty directory where the log should land blocks the move.
        let blocker = new_dir.join(LOG_FILE_NAME);
        fs::create_dir_all(&blocker).unwrap();
        fs::write(blocker.join("keep"), "").unwrap();

        let err = relocate_backups(&config, &new_dir).unwrap_err();
        match err {
            RecordsError::RelocationRolledBack { restored, .. } => {
                assert_eq!(restored, config.permanent_backup_location)
            }
            other => panic!("expected rollback, got {other:?}"),
        }
        assert_eq!(
            fs::read_to_string(&config.permanent_backup_location).unwrap(),
            "x: 1, a\n"
        );
        assert!(config.permanent_log_location_dir.exists());
        assert!(!new_dir.join(DATA_FILE_NAME).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_relocate_rejects_unwritable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, config) = setup();
        let new_dir = dir.path().join("locked");
        fs::create_dir_all(&new_dir).unwrap();
        fs::set_permissions(&new_dir, fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users can write anyway; nothing to check then.
        let writable = fs::File::create(new_dir.join("canary")).is_ok();
        if !writable {
            let err = relocate_backups(&config, &new_dir).unwrap_err();
            assert!(matches!(err, RecordsError::ReadOnlyDirectory(_)));
            assert!(config.permanent_backup_location.exists());
            assert!(config.permanent_log_location_dir.exists());
        }

        fs::set_permissions(&new_dir, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
