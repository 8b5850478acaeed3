use std::{
    env,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use tempfile::TempDir;
use tunescout::{
    Error,
    config::{APIS_FILE, Config, apis_file_candidates},
    management::load_credentials,
    types::Credentials,
};

// Every test in this binary that reads or writes the process environment
// holds this lock.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_file_values_take_precedence_over_environment() {
    let _guard = env_lock();
    unsafe { env::set_var("TUNESCOUT_TEST_PRECEDENCE", "from-env") };

    let config = Config::from_values([("TUNESCOUT_TEST_PRECEDENCE", "from-file")]);
    let value = config.get("TUNESCOUT_TEST_PRECEDENCE");

    unsafe { env::remove_var("TUNESCOUT_TEST_PRECEDENCE") };
    assert_eq!(value, Some("from-file".to_string()));
}

#[test]
fn test_environment_fallback_for_missing_key() {
    let _guard = env_lock();
    unsafe { env::set_var("TUNESCOUT_TEST_FALLBACK", "from-env") };

    let value = Config::default().get("TUNESCOUT_TEST_FALLBACK");

    unsafe { env::remove_var("TUNESCOUT_TEST_FALLBACK") };
    assert_eq!(value, Some("from-env".to_string()));
}

#[test]
fn test_empty_values_count_as_missing() {
    let _guard = env_lock();
    unsafe { env::remove_var("TUNESCOUT_TEST_EMPTY") };

    let config = Config::from_values([("TUNESCOUT_TEST_EMPTY", "")]);
    assert!(config.get("TUNESCOUT_TEST_EMPTY").is_none());
    assert!(matches!(
        config.require("TUNESCOUT_TEST_EMPTY"),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_get_or_default() {
    let _guard = env_lock();
    let config = Config::from_values([("A", "1")]);
    assert_eq!(config.get_or("A", "x"), "1");
    assert_eq!(config.get_or("TUNESCOUT_TEST_NEVER_SET", "x"), "x");
}

#[test]
fn test_credentials_from_environment_only() {
    let _guard = env_lock();
    unsafe {
        env::set_var("SPOTIFY_CLIENT_ID", "a");
        env::set_var("SPOTIFY_CLIENT_SECRET", "b");
    }

    let credentials =
        load_credentials(&Config::default(), "SPOTIFY_CLIENT_ID", "SPOTIFY_CLIENT_SECRET");

    unsafe {
        env::remove_var("SPOTIFY_CLIENT_ID");
        env::remove_var("SPOTIFY_CLIENT_SECRET");
    }
    assert_eq!(credentials.unwrap(), Credentials::new("a", "b"));
}

#[test]
fn test_credentials_from_file_values() {
    let _guard = env_lock();
    let config = Config::from_values([
        ("TIDAL_CLIENT_ID", "file-id"),
        ("TIDAL_CLIENT_SECRET", "file-secret"),
    ]);

    let credentials =
        load_credentials(&config, "TIDAL_CLIENT_ID", "TIDAL_CLIENT_SECRET").unwrap();
    assert_eq!(credentials, Credentials::new("file-id", "file-secret"));
}

#[test]
fn test_missing_secret_is_configuration_error() {
    let _guard = env_lock();
    let config = Config::from_values([("TUNESCOUT_TEST_ONLY_ID", "id")]);

    let err = load_credentials(&config, "TUNESCOUT_TEST_ONLY_ID", "TUNESCOUT_TEST_NO_SECRET")
        .unwrap_err();
    match err {
        Error::Configuration(message) => {
            assert!(message.contains("TUNESCOUT_TEST_NO_SECRET"));
            assert!(!message.contains("TUNESCOUT_TEST_ONLY_ID"));
        }
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_debug_output_hides_secret() {
    let credentials = Credentials::new("visible", "hidden-value");
    let printed = format!("{:?}", credentials);
    assert!(printed.contains("visible"));
    assert!(!printed.contains("hidden-value"));
}

#[tokio::test]
async fn test_from_file_accepts_strings_and_numbers() {
    let _guard = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        APIS_FILE,
        r#"{
            "TUNESCOUT_TEST_ID": "abc",
            "TUNESCOUT_TEST_APP": 950096963,
            "TUNESCOUT_TEST_NESTED": {"a": 1}
        }"#,
    );

    let config = Config::from_file(path.clone()).await.unwrap();
    assert_eq!(config.get("TUNESCOUT_TEST_ID"), Some("abc".to_string()));
    assert_eq!(
        config.get("TUNESCOUT_TEST_APP"),
        Some("950096963".to_string())
    );
    assert!(config.get("TUNESCOUT_TEST_NESTED").is_none());
    assert_eq!(config.source().map(PathBuf::as_path), Some(path.as_path()));
}

#[tokio::test]
async fn test_from_file_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "broken.json", "{ not json");

    let result = Config::from_file(path).await;
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[tokio::test]
async fn test_from_file_rejects_non_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "array.json", "[1, 2, 3]");

    let result = Config::from_file(path).await;
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[tokio::test]
async fn test_from_file_missing_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = Config::from_file(dir.path().join(APIS_FILE)).await;
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn test_candidates_start_with_working_directory() {
    let candidates = apis_file_candidates();
    assert_eq!(candidates[0], PathBuf::from(APIS_FILE));

    let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
    assert_eq!(candidates.get(1), Some(&exe_dir.join(APIS_FILE)));
}
