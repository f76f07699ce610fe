use super::*;
use super::Method;
use httpmock::prelude::*;
use serde_json::json;

fn catalog(server: &MockServer) -> RestCatalog {
    RestCatalog::new(
        ApiTransport::new().unwrap(),
        Credentials {
            username: "ada".to_string(),
            api_key: "k3y".to_string(),
            server_url: server.base_url(),
        },
    )
}

#[test]
fn search_sends_query_and_auth_params() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/concept/search/")
            .query_param("q", "read file")
            .query_param("username", "ada")
            .query_param("api_key", "k3y");
        then.status(200).json_body(json!({
            "objects": [
                {"id": 1, "name": "Read a file"},
                {"id": "2", "name": "Read lines"}
            ]
        }));
    });

    let items = catalog(&server).search("read file").unwrap();

    mock.assert();
    let labels: Vec<String> = items.iter().map(ResultItem::label).collect();
    assert_eq!(labels, vec!["Read a file", "Read lines"]);
}

#[test]
fn empty_search_result_is_not_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/concept/search/");
        then.status(200).json_body(json!({"objects": []}));
    });

    assert!(catalog(&server).search("nothing").unwrap().is_empty());
}

#[test]
fn expanding_a_concept_fetches_methods_in_bulk() {
    let server = MockServer::start();
    let detail = server.mock(|when, then| {
        when.method(GET).path("/concept/7/").query_param("username", "ada");
        then.status(200).json_body(json!({
            "id": 7,
            "methods": [3, "/api/v1/method/5/", {"id": 8}]
        }));
    });
    let set = server.mock(|when, then| {
        when.method(GET)
            .path("/method/set/3;5;8/")
            .query_param("api_key", "k3y");
        then.status(200).json_body(json!({
            "objects": [
                {"id": 3, "main_language": "python", "title": "with open"},
                {"id": 5, "main_language": "rust", "title": ""},
                {"id": 8, "main_language": "go"}
            ]
        }));
    });

    let concept = ResultItem::Concept(Concept {
        id: 7,
        name: "Read a file".to_string(),
    });
    let methods = catalog(&server).expand(&concept).unwrap();

    detail.assert();
    set.assert();
    let labels: Vec<String> = methods.iter().map(ResultItem::label).collect();
    assert_eq!(labels, vec!["python - with open", "rust", "go"]);
}

#[test]
fn concept_without_methods_skips_bulk_fetch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/concept/7/");
        then.status(200).json_body(json!({"id": 7, "methods": []}));
    });
    let set = server.mock(|when, then| {
        when.method(GET).path_includes("/method/set/");
        then.status(200).json_body(json!({"objects": []}));
    });

    let concept = ResultItem::Concept(Concept {
        id: 7,
        name: "empty".to_string(),
    });
    assert!(catalog(&server).expand(&concept).unwrap().is_empty());
    assert_eq!(set.hits(), 0);
}

#[test]
fn expanding_a_method_returns_snippets() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/method/3/");
        then.status(200).json_body(json!({
            "id": 3,
            "snippets": [{"id": 11, "content": "with open({{path}}) as f:\n    data = f.read()"}]
        }));
    });

    let method = ResultItem::Method(Method {
        id: 3,
        language: "python".to_string(),
        title: None,
    });
    let snippets = catalog(&server).expand(&method).unwrap();

    assert_eq!(snippets.len(), 1);
    match &snippets[0] {
        ResultItem::Snippet(snippet) => {
            assert_eq!(snippet.id, Some(11));
            assert!(snippet.code.starts_with("with open({{path}})"));
            assert!(snippet.parameters.is_empty());
        }
        other => panic!("expected snippet, got {other:?}"),
    }
}

#[test]
fn non_success_status_is_a_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/concept/search/");
        then.status(401).body("unauthorized");
    });

    let err = catalog(&server).search("x").unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, CatalogError::Status { status: 401, .. }));
    assert!(!err.to_string().contains("k3y"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/concept/search/");
        then.status(200).body("{not json");
    });

    let err = catalog(&server).search("x").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn missing_objects_list_is_a_shape_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/concept/search/");
        then.status(200).json_body(json!({"meta": {}}));
    });

    let err = catalog(&server).search("x").unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let catalog = RestCatalog::new(
        ApiTransport::new().unwrap(),
        Credentials {
            username: "ada".to_string(),
            api_key: "k3y".to_string(),
            server_url: "http://127.0.0.1:1".to_string(),
        },
    );

    let err = catalog.search("x").unwrap_err();
    assert!(matches!(err, CatalogError::Transport { .. }));
    assert!(!err.to_string().contains("k3y"));
}
