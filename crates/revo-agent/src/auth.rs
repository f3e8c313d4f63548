//! API credential lookup
//!
//! The credential is the only required setting. It is read once, before any
//! input is resolved, from the environment variable named in
//! `models.api_key_env` (default `OPENAI_API_KEY`).

use revo_core::{Result, RevoError};
use std::env;

/// Get the API key from the named environment variable
pub fn get_api_key(env_var: &str) -> Result<String> {
    get_api_key_from(env_var, |key| env::var(key).ok())
}

/// Get the API key through `lookup`, which maps a variable name to its value
pub fn get_api_key_from<F>(env_var: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(env_var) {
        Some(key) if !key.trim().is_empty() => {
            tracing::debug!("Using API key from {}", env_var);
            Ok(key.trim().to_string())
        }
        _ => Err(RevoError::Config(format!(
            "{} is not set in the environment or .env",
            env_var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to prevent concurrent env var modifications
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env_var<F, R>(key: &str, value: Option<&str>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_LOCK.lock().unwrap();

        let original = env::var(key).ok();
        match value {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }

        let result = f();

        match original {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }

        result
    }

    #[test]
    fn test_key_present() {
        with_env_var("REVO_TEST_KEY_PRESENT", Some("sk-test "), || {
            assert_eq!(get_api_key("REVO_TEST_KEY_PRESENT").unwrap(), "sk-test");
        });
    }

    #[test]
    fn test_key_missing() {
        with_env_var("REVO_TEST_KEY_MISSING", None, || {
            let err = get_api_key("REVO_TEST_KEY_MISSING").unwrap_err();
            assert!(err.is_configuration());
            assert!(err.to_string().contains("REVO_TEST_KEY_MISSING"));
        });
    }

    #[test]
    fn test_key_blank() {
        with_env_var("REVO_TEST_KEY_BLANK", Some("   "), || {
            assert!(get_api_key("REVO_TEST_KEY_BLANK").is_err());
        });
    }

    #[test]
    fn test_lookup_closure() {
        let lookup = |key: &str| (key == "CUSTOM_KEY").then(|| " sk-custom\n".to_string());

        assert_eq!(get_api_key_from("CUSTOM_KEY", lookup).unwrap(), "sk-custom");
        assert!(get_api_key_from("OPENAI_API_KEY", lookup)
            .unwrap_err()
            .is_configuration());
    }
}
