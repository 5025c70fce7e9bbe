use std::time::Duration;

use kinship::config::{ClientConfig, DEFAULT_API_URL, ENV_API_URL, ENV_SESSION, ENV_TIMEOUT};
use kinship::id::EntityKey;
use kinship::models::User;
use kinship::{FileSessionStore, Session, SessionStore};
use serial_test::serial;

const CONFIG_VARS: &[&str] = &[ENV_API_URL, ENV_TIMEOUT, ENV_SESSION];

/// Clears the config variables, runs `body`, and clears them again.
fn with_clean_env(set: &[(&str, &str)], body: impl FnOnce()) {
    // SAFETY: every test touching these variables is #[serial].
    unsafe {
        for key in CONFIG_VARS {
            std::env::remove_var(key);
        }
        for (key, value) in set {
            std::env::set_var(key, value);
        }
    }
    body();
    unsafe {
        for key in CONFIG_VARS {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn session_survives_a_round_trip_through_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
    assert!(!store.load().unwrap().is_authenticated());

    let user = User {
        key: EntityKey::new("U1"),
        name: "Ada".to_string(),
        ..Default::default()
    };
    let session = Session::authenticated("tok-1", Some(user)).unwrap();
    store.save(&session).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.token(), Some("tok-1"));
    assert_eq!(loaded.user_id().unwrap(), "U1");

    store.clear().unwrap();
    assert!(!store.path().exists());
    store.clear().unwrap();
}

#[test]
fn corrupt_session_file_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = FileSessionStore::new(&path).load();
    assert!(matches!(result, Err(kinship::ClientError::Storage(_))));
}

#[test]
#[serial]
fn defaults_apply_without_file_or_env() {
    with_clean_env(&[], || {
        let config = ClientConfig::load(None).unwrap();
        assert_eq!(config.api_url.as_str(), format!("{DEFAULT_API_URL}/"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.session_path.ends_with(".kinship/session.json"));
    });
}

#[test]
#[serial]
fn environment_overrides_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(
        &mut file,
        b"[api]\nurl = \"https://file.example\"\ntimeout_secs = 5\n\n[session]\npath = \"/tmp/from-file.json\"\n",
    )
    .unwrap();

    with_clean_env(&[(ENV_API_URL, "https://env.example"), (ENV_SESSION, "/tmp/from-env.json")], || {
        let config = ClientConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.api_url.host_str(), Some("env.example"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.session_path, std::path::PathBuf::from("/tmp/from-env.json"));
    });
}

#[test]
#[serial]
fn malformed_timeout_is_a_config_error() {
    with_clean_env(&[(ENV_TIMEOUT, "soon")], || {
        let result = ClientConfig::load(None);
        assert!(matches!(result, Err(kinship::ClientError::Config(_))));
    });
}
