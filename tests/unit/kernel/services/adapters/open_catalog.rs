use super::*;

fn configured(backend: Option<&str>) -> Settings {
    Settings {
        cc_user: Some("ada".to_string()),
        cc_key: Some("k".to_string()),
        cc_api_url: Some("http://127.0.0.1:9/api/v1".to_string()),
        cc_backend: backend.map(str::to_string),
        ..Settings::default()
    }
}

#[test]
fn graphql_is_the_default_backend() {
    let catalog = open_catalog(&configured(None)).unwrap();
    assert_eq!(catalog.name(), "graphql");
}

#[test]
fn rest_backend_is_selectable() {
    let catalog = open_catalog(&configured(Some("rest"))).unwrap();
    assert_eq!(catalog.name(), "rest");
}

#[test]
fn missing_credentials_fail_before_any_client_is_built() {
    let settings = Settings {
        cc_user: Some("ada".to_string()),
        ..Settings::default()
    };
    assert_eq!(
        open_catalog(&settings).err(),
        Some(ConfigError::MissingCredentials)
    );
}

#[test]
fn unknown_backend_is_a_configuration_error() {
    assert!(matches!(
        open_catalog(&configured(Some("ftp"))),
        Err(ConfigError::UnknownBackend(_))
    ));
}
