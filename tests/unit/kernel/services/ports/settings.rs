use super::*;

fn settings(user: Option<&str>, key: Option<&str>) -> Settings {
    Settings {
        cc_user: user.map(str::to_string),
        cc_key: key.map(str::to_string),
        ..Settings::default()
    }
}

#[test]
fn missing_user_or_key_is_a_configuration_error() {
    for s in [
        settings(None, Some("k")),
        settings(Some("u"), None),
        settings(Some("  "), Some("k")),
    ] {
        assert_eq!(
            Credentials::from_settings(&s, Backend::Graphql),
            Err(ConfigError::MissingCredentials)
        );
    }
}

#[test]
fn graphql_falls_back_to_default_server() {
    let creds = Credentials::from_settings(&settings(Some("u"), Some("k")), Backend::Graphql)
        .unwrap();
    assert_eq!(creds.server_url, "http://localhost:4000/graphql");
}

#[test]
fn graphql_joins_custom_server_and_path() {
    let mut s = settings(Some("u"), Some("k"));
    s.cc_api_server = Some("https://codecook.io/".to_string());
    s.cc_api_path = Some("api/dev".to_string());

    let creds = Credentials::from_settings(&s, Backend::Graphql).unwrap();
    assert_eq!(creds.server_url, "https://codecook.io/api/dev");
}

#[test]
fn rest_requires_api_url() {
    let s = settings(Some("u"), Some("k"));
    let err = Credentials::from_settings(&s, Backend::Rest).unwrap_err();
    assert_eq!(err, ConfigError::MissingApiUrl);
    assert!(err.to_string().contains("cc_api_url"));
}

#[test]
fn rest_trims_trailing_slash() {
    let mut s = settings(Some("u"), Some("k"));
    s.cc_api_url = Some("https://codecarbon.io/api/v1/".to_string());

    let creds = Credentials::from_settings(&s, Backend::Rest).unwrap();
    assert_eq!(creds.server_url, "https://codecarbon.io/api/v1");
    assert_eq!(creds.username, "u");
    assert_eq!(creds.api_key, "k");
}

#[test]
fn non_http_url_is_rejected() {
    let mut s = settings(Some("u"), Some("k"));
    s.cc_api_url = Some("ftp://example.com".to_string());

    assert!(matches!(
        Credentials::from_settings(&s, Backend::Rest),
        Err(ConfigError::InvalidUrl { .. })
    ));
}

#[test]
fn backend_parse_accepts_known_names() {
    assert_eq!(Backend::parse(None), Ok(Backend::Graphql));
    assert_eq!(Backend::parse(Some("")), Ok(Backend::Graphql));
    assert_eq!(Backend::parse(Some("REST")), Ok(Backend::Rest));
    assert_eq!(Backend::parse(Some("codecarbon")), Ok(Backend::Rest));
    assert_eq!(
        Backend::parse(Some("soap")),
        Err(ConfigError::UnknownBackend("soap".to_string()))
    );
}

#[test]
fn debug_output_hides_api_key() {
    let creds = Credentials {
        username: "u".to_string(),
        api_key: "secret".to_string(),
        server_url: "http://x".to_string(),
    };
    assert!(!format!("{creds:?}").contains("secret"));
}

#[test]
fn settings_deserialize_with_missing_keys() {
    let s: Settings = serde_json::from_str(r#"{"cc_user": "u", "cc_backend": "rest"}"#).unwrap();
    assert_eq!(s.cc_user.as_deref(), Some("u"));
    assert_eq!(s.cc_backend.as_deref(), Some("rest"));
    assert!(!s.cc_graphql_auth);
}
