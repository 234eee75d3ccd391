//! Integration tests for configuration loading.

use celebrity_quiz::models::config::load_config_from;
use celebrity_quiz::models::matching::MatchProfile;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_config_from(&temp_dir.path().join("config.toml")).unwrap();
    assert_eq!(config.matching.profile, MatchProfile::Standard);
    assert_eq!(config.quiz.points_correct, 10);
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
catalog_path = "/srv/quiz/celebrities.json"

[matching]
profile = "strict"

[wikipedia]
user_agent = "QuizTest/0.1"
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.matching.profile, MatchProfile::Strict);
    assert_eq!(config.wikipedia.user_agent, "QuizTest/0.1");
    assert_eq!(config.wikipedia.rate_limit_ms, 100);
}

#[test]
fn test_invalid_file_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    std::fs::write(&path, "[matching]\nthreshold = \"high\"\n").unwrap();
    assert!(load_config_from(&path).is_err());

    std::fs::write(
        &path,
        "[matching]\nthreshold = 50\nsuggestion_threshold = 70\n",
    )
    .unwrap();
    assert!(load_config_from(&path).is_err());
}
