use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        "moderation_concurrency = 8\ndelete_prompt = \"Really?\"\nscroll_animated = \"no\"\n",
    );

    assert_eq!(settings.moderation_concurrency, 8);
    assert_eq!(settings.delete_prompt, "Really?");
    assert!(!settings.scroll_animated);
}

#[test]
fn unparseable_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "moderation_concurrency = [");
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_win_and_zero_concurrency_is_raised_to_one() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "moderation_concurrency = \"6\"");
    apply_env_overrides(&mut settings, |key| match key {
        "APP__MODERATION_CONCURRENCY" => Some("0".to_string()),
        "APP__SCROLL_ANIMATED" => Some("false".to_string()),
        _ => None,
    });

    assert_eq!(settings.moderation_concurrency, 1);
    assert!(!settings.scroll_animated);
    assert_eq!(settings.delete_prompt, Settings::default().delete_prompt);
}

#[test]
fn invalid_values_keep_previous_setting() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| match key {
        "APP__MODERATION_CONCURRENCY" => Some("many".to_string()),
        "APP__SCROLL_ANIMATED" => Some("sometimes".to_string()),
        _ => None,
    });
    assert_eq!(settings, Settings::default());
}

#[test]
fn loads_settings_file_from_path() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("cms_client_settings_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("client.toml");
    fs::write(&path, "delete_prompt = \"Remove these comments?\"\n").expect("write settings");

    let settings = load_settings_from(&path);
    assert_eq!(settings.delete_prompt, "Remove these comments?");

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_file_yields_defaults() {
    let settings = load_settings_from(Path::new("/nonexistent/cms-client/client.toml"));
    assert_eq!(settings.scroll_animated, Settings::default().scroll_animated);
}
