use std::sync::Arc;

use tagbind::{AccessPath, FieldMapper, Kind, Reflect, Slot};

#[derive(Debug, Default, Reflect)]
struct Audit {
    #[bind(http = "trace", json = "traceId")]
    trace_id: String,
    #[bind(http = "-", json = "internal")]
    internal: String,
}

#[derive(Debug, Default, Reflect)]
struct Context {
    #[bind(http = "sid")]
    session_id: String,
    #[bind(flatten)]
    audit: Audit,
}

#[derive(Debug, Default, Reflect)]
struct Request {
    #[bind(flatten)]
    context: Context,
    #[bind(http = "l")]
    labels: Vec<String>,
    #[bind(http = "max,omitempty")]
    max_results: i64,
    page_size: i64,
    #[bind(http = ",omitempty")]
    cursor: String,
}

#[tagbind_testhelpers::test]
fn mapping_is_built_once_and_reused() {
    let mapper = FieldMapper::new("http");
    assert_eq!(mapper.cached_types(), 0);

    let first = mapper.mapping_for::<Request>();
    let second = mapper.mapping_for::<Request>();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(mapper.cached_types(), 1);

    assert_eq!(
        first.names().collect::<Vec<_>>(),
        second.names().collect::<Vec<_>>()
    );
    for field in first.iter() {
        assert_eq!(second.get(field.name()).unwrap().path(), field.path());
    }

    mapper.mapping_for::<Context>();
    assert_eq!(mapper.cached_types(), 2);
}

#[tagbind_testhelpers::test]
fn independent_mappers_have_independent_caches() {
    let a = FieldMapper::new("http");
    let b = FieldMapper::new("http");
    a.mapping_for::<Request>();
    assert_eq!(a.cached_types(), 1);
    assert_eq!(b.cached_types(), 0);
}

#[tagbind_testhelpers::test]
fn embedded_fields_are_promoted() {
    let mapper = FieldMapper::new("http");
    let mapping = mapper.mapping_for::<Request>();

    assert_eq!(
        mapping.names().collect::<Vec<_>>(),
        ["sid", "trace", "l", "max"]
    );

    let sid = mapping.get("sid").unwrap();
    assert!(sid.is_embedded());
    assert_eq!(sid.path().steps(), [0, 0]);
    assert_eq!(sid.path().to_string(), "context.session_id");

    let trace = mapping.get("trace").unwrap();
    assert_eq!(trace.path().steps(), [0, 1, 0]);
    assert_eq!(trace.path().to_string(), "context.audit.trace_id");
    assert_eq!(trace.shape(), String::SHAPE);

    let labels = mapping.get("l").unwrap();
    assert!(!labels.is_embedded());
    assert!(matches!(labels.shape().kind, Kind::List(_)));
}

#[tagbind_testhelpers::test]
fn tags_are_read_per_key() {
    let mapper = FieldMapper::new("json");
    let mapping = mapper.mapping_for::<Request>();

    // only Audit carries json tags; excluded-for-http is fine for json
    assert_eq!(mapping.names().collect::<Vec<_>>(), ["traceId", "internal"]);
    assert_eq!(mapper.tag(), "json");
}

#[tagbind_testhelpers::test]
fn untagged_and_excluded_fields() {
    let mapper = FieldMapper::new("http");
    let mapping = mapper.mapping_for::<Request>();
    assert!(!mapping.contains("page_size"));
    assert!(!mapping.contains("internal"));
    assert!(!mapping.contains("cursor"));
    assert!(!mapping.contains(""));

    let mapper = FieldMapper::builder("http")
        .name_fn(|name| name.replace('_', "-"))
        .build();
    let mapping = mapper.mapping_for::<Request>();
    assert!(mapping.contains("page-size"));
    // a tag with an empty name falls back to the name function
    assert!(mapping.contains("cursor"));
    // exclusion wins over the name function
    assert!(!mapping.contains("internal"));
    // flattened structs are still promoted, not named
    assert!(!mapping.contains("context"));
    assert!(mapping.contains("sid"));
}

#[tagbind_testhelpers::test]
fn tag_options() {
    let mapper = FieldMapper::new("http");
    let mapping = mapper.mapping_for::<Request>();
    let max = mapping.get("max").unwrap();
    assert_eq!(max.options(), ["omitempty"]);
    assert!(mapping.get("l").unwrap().options().is_empty());
}

#[tagbind_testhelpers::test]
fn traversals_by_name_follow_request_order() {
    let mapper = FieldMapper::new("http");
    let paths = mapper.traversals_by_name(Request::SHAPE, ["max", "nope", "sid"]);

    let mut expected_max = AccessPath::new(Request::SHAPE);
    expected_max.push(2);
    let mut expected_sid = AccessPath::new(Request::SHAPE);
    expected_sid.push(0);
    expected_sid.push(0);

    assert_eq!(paths, [Some(expected_max), None, Some(expected_sid)]);
}

#[tagbind_testhelpers::test]
fn field_by_name_borrows_the_field() {
    let mapper = FieldMapper::new("http");
    let mut request = Request::default();

    match mapper.field_by_name(&mut request, "trace") {
        Some(Slot::Text(text)) => text.push_str("abc"),
        other => panic!("expected a text slot, got {other:?}"),
    }
    assert_eq!(request.context.audit.trace_id, "abc");

    assert!(mapper.field_by_name(&mut request, "nope").is_none());
}

#[tagbind_testhelpers::test]
fn non_struct_types_map_to_nothing() {
    let mapper = FieldMapper::new("http");
    assert!(mapper.mapping_for::<String>().is_empty());
    assert!(mapper.mapping_for::<Vec<i64>>().is_empty());
}

#[tagbind_testhelpers::test]
fn default_mapper_reads_http_tags() {
    assert_eq!(tagbind::default_mapper().tag(), tagbind::DEFAULT_TAG);
    assert_eq!(tagbind::DEFAULT_TAG, "http");
    assert!(tagbind::default_mapper().mapping_for::<Request>().contains("sid"));
}
