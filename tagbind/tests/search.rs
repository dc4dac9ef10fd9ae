//! A search endpoint's request model, bound from its query string.

use tagbind::{BindInput, FieldMapper, Reflect};

#[derive(Debug, Default, Reflect)]
struct RequestContext {
    #[bind(http = "sid")]
    session_id: String,
}

#[derive(Debug, Default, Reflect)]
struct SearchRequest {
    #[bind(flatten)]
    context: RequestContext,
    #[bind(http = "l")]
    labels: Vec<String>,
    #[bind(http = "max")]
    max_results: i64,
    #[bind(http = "x")]
    exact: bool,
}

#[tagbind_testhelpers::test]
fn binds_every_field_kind() {
    let mut input = BindInput::new();
    input.insert("sid", ["id"]);
    input.insert("l", ["foo", "bar"]);
    input.insert("max", ["100"]);
    input.insert("x", ["true"]);

    let mapper = FieldMapper::new("http");
    let mut request = SearchRequest::default();
    mapper.bind(&mut request, &input).unwrap();

    assert_eq!(request.context.session_id, "id");
    assert_eq!(request.labels, ["foo", "bar"]);
    assert_eq!(request.max_results, 100);
    assert!(request.exact);
}

#[tagbind_testhelpers::test]
fn binds_from_query_string() {
    let input = BindInput::from_query("?sid=id&l=foo&l=bar&max=100&x=true");

    let mut request = SearchRequest::default();
    tagbind::bind(&mut request, &input).unwrap();

    assert_eq!(request.context.session_id, "id");
    assert_eq!(request.labels, ["foo", "bar"]);
    assert_eq!(request.max_results, 100);
    assert!(request.exact);
}

#[tagbind_testhelpers::test]
fn malformed_max_is_reported() {
    let input = BindInput::from_query("sid=id&max=abc&x=true");

    let mut request = SearchRequest::default();
    let err = tagbind::bind(&mut request, &input).unwrap_err();

    assert_eq!(err.name(), "max");
    assert!(err.coerce_error().unwrap().is_parse_failure());
    insta::assert_snapshot!(err.to_string(), @r#"max: invalid integer "abc": invalid digit found in string"#);

    // sid came first and stays bound; x came after and was never reached
    assert_eq!(request.context.session_id, "id");
    assert!(!request.exact);
}
