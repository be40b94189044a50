use pulseboard_core::auth::{AuthService, Credentials, User};
use pulseboard_core::config::AppConfig;
use pulseboard_core::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};
use pulseboard_infrastructure::{ConfigService, JsonFileKeyValueStore, MockAuthService};
use std::fs;
use tempfile::TempDir;

#[tokio::test(start_paused = true)]
async fn test_granted_session_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session.json");

    let auth = MockAuthService::from_settings(&AppConfig::default().auth);
    let grant = auth
        .authenticate(&Credentials::new("admin", "admin123"))
        .await
        .expect("Demo account should be accepted");

    {
        let store = JsonFileKeyValueStore::open(path.clone()).await.unwrap();
        store.set(TOKEN_KEY, grant.token.clone()).await.unwrap();
        store
            .set(USER_KEY, serde_json::to_string(&grant.user).unwrap())
            .await
            .unwrap();
    }

    let reopened = JsonFileKeyValueStore::open(path).await.unwrap();
    assert_eq!(
        reopened.get(TOKEN_KEY).await.unwrap().as_deref(),
        Some(grant.token.as_str())
    );

    let raw_user = reopened.get(USER_KEY).await.unwrap().unwrap();
    let user: User = serde_json::from_str(&raw_user).unwrap();
    assert_eq!(user, grant.user);
    assert!(raw_user.contains("avatarLabel"), "User is stored as camelCase JSON");
}

#[tokio::test(start_paused = true)]
async fn test_configured_account_replaces_demo_account() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[auth]\nusername = \"ops\"\npassword = \"hunter2\"\ndelay_ms = 0\n",
    )
    .unwrap();

    let config = ConfigService::with_path(config_path).load().unwrap();
    let auth = MockAuthService::from_settings(&config.auth);

    assert!(auth
        .authenticate(&Credentials::new("ops", "hunter2"))
        .await
        .is_ok());
    assert!(auth
        .authenticate(&Credentials::new("admin", "admin123"))
        .await
        .unwrap_err()
        .is_invalid_credentials());
}
