use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const HOME_ENV: &str = "PROFILE_EXPLORER_HOME";
pub const ADMIN_ENV: &str = "PROFILE_EXPLORER_ADMIN";
pub const CREATE_DELAY_ENV: &str = "PROFILE_EXPLORER_CREATE_DELAY_MS";

/// Get the profile_explorer home directory
pub fn get_explorer_home() -> Result<PathBuf> {
    if let Ok(val) = env::var(HOME_ENV) {
        if !val.is_empty() {
            return Ok(PathBuf::from(val));
        }
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("Cannot determine home directory")?;

    Ok(PathBuf::from(home).join(".profile_explorer"))
}

/// Get the settings file path
pub fn get_settings_file() -> Result<PathBuf> {
    let home = get_explorer_home()?;
    Ok(home.join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EnvGuard, ENV_LOCK};

    #[test]
    fn uses_explicit_home_when_set() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let temp_dir = tempfile::tempdir().unwrap();
        let _guard = EnvGuard::set(HOME_ENV, temp_dir.path());

        assert_eq!(get_explorer_home().unwrap(), temp_dir.path());
        assert_eq!(
            get_settings_file().unwrap(),
            temp_dir.path().join("settings.json")
        );
    }

    #[test]
    fn falls_back_to_home_directory() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let temp_dir = tempfile::tempdir().unwrap();
        let _explicit = EnvGuard::set(HOME_ENV, "");
        let _home = EnvGuard::set("HOME", temp_dir.path());

        assert_eq!(
            get_explorer_home().unwrap(),
            temp_dir.path().join(".profile_explorer")
        );
    }
}
