//! Integration tests for building the application environment.

use cfenv_core::{AppEnv, AppEnvOptions, EnvSnapshot, Error};
use cfenv_test_utils::env::platform_vars;
use cfenv_test_utils::fixtures;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn local_app_env() -> AppEnv {
    let options = AppEnvOptions::from_json(&fixtures::swift_test_options()).unwrap();
    AppEnv::new(&EnvSnapshot::new(), &options).unwrap()
}

#[test]
fn test_local_run_without_options() {
    let app_env = AppEnv::new(&EnvSnapshot::new(), &AppEnvOptions::default()).unwrap();

    assert!(app_env.is_local());
    assert_eq!(app_env.port(), 8090);
    assert_eq!(app_env.name(), None);
    assert_eq!(app_env.bind(), "0.0.0.0");
    assert_eq!(app_env.urls(), ["http://localhost:8090"]);
    assert_eq!(app_env.services(), &json!({}));
}

#[test]
fn test_local_run_with_options() {
    let app_env = local_app_env();

    assert!(app_env.is_local());
    assert_eq!(app_env.port(), 8090);
    assert_eq!(app_env.name(), Some(fixtures::APP_NAME));
    assert_eq!(app_env.bind(), "0.0.0.0");
    // Routes from the metadata are ignored on a local run
    assert_eq!(app_env.urls(), ["http://localhost:8090"]);
    assert_eq!(app_env.services().as_object().unwrap().len(), 1);
}

#[test]
fn test_local_run_protocol_and_name_override() {
    let options = AppEnvOptions::from_json(&fixtures::swift_test_options())
        .unwrap()
        .with_name("renamed")
        .with_protocol("https");
    let env = EnvSnapshot::from_pairs([("PORT", "3000")]);
    let app_env = AppEnv::new(&env, &options).unwrap();

    assert_eq!(app_env.name(), Some("renamed"));
    assert_eq!(app_env.url(), "https://localhost:3000");
}

#[test]
fn test_platform_run() {
    let app_env = AppEnv::new(
        &EnvSnapshot::from_pairs(platform_vars()),
        &AppEnvOptions::default(),
    )
    .unwrap();

    assert!(!app_env.is_local());
    assert_eq!(app_env.port(), fixtures::APP_PORT);
    assert_eq!(app_env.name(), Some(fixtures::APP_NAME));
    assert_eq!(
        app_env.urls(),
        [format!("https://{}", fixtures::APP_URI)]
    );
    assert_eq!(app_env.get_services().len(), 1);
}

#[rstest]
#[case("{}")]
#[case(r#"{"uris": ["a.example.com"]}"#)]
fn test_platform_run_without_port_or_name_defaults(#[case] metadata: &str) {
    let env = EnvSnapshot::from_pairs([("VCAP_APPLICATION", metadata)]);
    let app_env = AppEnv::new(&env, &AppEnvOptions::default()).unwrap();

    assert!(!app_env.is_local());
    assert_eq!(app_env.port(), 8090);
}

#[test]
fn test_named_platform_run_without_port_fails() {
    let mut vars = platform_vars();
    vars.retain(|(name, _)| name != "PORT");
    let env: EnvSnapshot = vars.into_iter().collect();

    let err = AppEnv::new(&env, &AppEnvOptions::default()).unwrap_err();
    assert!(matches!(err, Error::VariableNotFound { .. }));
}

#[test]
fn test_platform_run_without_routes() {
    let env = EnvSnapshot::from_pairs([("VCAP_APPLICATION", "{}"), ("CF_INSTANCE_PORT", "8080")]);
    let app_env = AppEnv::new(&env, &AppEnvOptions::default()).unwrap();
    assert_eq!(app_env.urls(), ["https://localhost"]);
    assert_eq!(app_env.url(), "https://localhost");
}

#[rstest]
#[case(&[("PORT", "61263")], 61263)]
#[case(&[("CF_INSTANCE_PORT", "4000"), ("VCAP_APP_PORT", "5000")], 4000)]
#[case(&[("VCAP_APP_PORT", "5000")], 5000)]
#[case(&[("PORT", "1"), ("CF_INSTANCE_PORT", "2"), ("VCAP_APP_PORT", "3")], 1)]
#[case(&[], 8090)]
fn test_port_precedence(#[case] vars: &[(&str, &str)], #[case] expected: u16) {
    let env = EnvSnapshot::from_pairs(vars.iter().copied());
    let app_env = AppEnv::new(&env, &AppEnvOptions::default()).unwrap();
    assert_eq!(app_env.port(), expected);
    assert_eq!(app_env.url(), format!("http://localhost:{expected}"));
}

#[rstest]
#[case("abc")]
#[case("")]
#[case("70000")]
#[case("-1")]
fn test_invalid_port(#[case] port: &str) {
    let env = EnvSnapshot::from_pairs([("PORT", port)]);
    match AppEnv::new(&env, &AppEnvOptions::default()) {
        Err(Error::InvalidValue { name, .. }) => assert_eq!(name, "PORT"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn test_get_app() {
    let app = local_app_env().get_app().expect("app record");

    assert_eq!(app.port, fixtures::APP_PORT);
    assert_eq!(app.id, fixtures::APP_ID);
    assert_eq!(app.version, fixtures::APP_VERSION);
    assert_eq!(app.name, fixtures::APP_NAME);
    assert_eq!(app.instance_id, fixtures::INSTANCE_ID);
    assert_eq!(app.instance_index, 0);
    assert_eq!(app.space_id, fixtures::SPACE_ID);
    assert_eq!(app.limits.memory, 128);
    assert_eq!(app.limits.disk, 1024);
    assert_eq!(app.limits.fds, 16384);
    assert_eq!(app.uris, vec![fixtures::APP_URI]);
    assert_eq!(
        app.started_at
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S %z").to_string())
            .as_deref(),
        Some(fixtures::STARTED_AT)
    );
    assert_eq!(app.started_at_ts(), Some(fixtures::STARTED_AT_TS));
}

#[test]
fn test_get_app_incomplete_metadata() {
    let mut application = fixtures::vcap_application();
    application.as_object_mut().unwrap().remove("instance_id");
    let options = AppEnvOptions::default().with_application(application);
    let app_env = AppEnv::new(&EnvSnapshot::new(), &options).unwrap();

    assert!(app_env.get_app().is_none());
    // The facade itself still resolves
    assert_eq!(app_env.name(), Some(fixtures::APP_NAME));
}

#[test]
fn test_app_env_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppEnv>();
}
