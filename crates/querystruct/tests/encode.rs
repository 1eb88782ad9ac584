//! Integration tests for encoding derived records.
//!
//! These tests exercise `#[derive(QueryRecord)]` together with the encoder and
//! the query-string serializer, asserting on the final canonical text.

#![allow(non_snake_case)]

use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc;

use querystruct::{encode, Error, FieldEncoder, QueryRecord, QueryValue, Resolved, ValueKind};

fn encoded<T: QueryValue + ?Sized>(value: &T) -> String {
    encode(value)
        .unwrap_or_else(|e| panic!("encoding failed: {e}"))
        .to_query_string()
}

fn unsupported_kind<T: QueryValue + ?Sized>(value: &T) -> ValueKind {
    match encode(value) {
        Err(Error::UnsupportedType { kind, .. }) => kind,
        other => panic!("expected UnsupportedType, got {other:?}"),
    }
}

#[derive(QueryRecord)]
#[qs(display)]
struct Person {
    #[qs("age")]
    age: i32,
    #[qs("name")]
    name: String,
    #[qs("-")]
    location: String,
    #[qs("parent,omitempty")]
    parent: Option<Box<Person>>,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn person(name: &str, age: i32) -> Person {
    Person {
        age,
        name: name.to_string(),
        location: String::new(),
        parent: None,
    }
}

#[test]
fn test_absent_input() {
    assert!(encode(&Option::<Person>::None).unwrap().is_empty());
    assert!(encode(&Option::<Box<Person>>::None).unwrap().is_empty());
}

fn not_a_struct<T: QueryValue + ?Sized>(value: &T) -> String {
    match encode(value) {
        Err(Error::NotAStruct(type_name)) => type_name,
        other => panic!("expected NotAStruct, got {other:?}"),
    }
}

#[test]
fn test_non_structs() {
    let (tx, _rx) = mpsc::channel::<i32>();
    let func: fn() = || {};
    let five = 5;

    assert_eq!(not_a_struct(&5), "i32");
    assert_eq!(not_a_struct(&&five), "&i32");
    assert!(not_a_struct(&HashMap::<i32, i32>::new()).contains("HashMap"));
    assert!(not_a_struct(&vec![1]).contains("Vec<i32>"));
    assert_eq!(not_a_struct(&[1]), "[i32; 1]");
    assert_eq!(not_a_struct(&func), "fn()");
    assert!(not_a_struct(&tx).contains("Sender<i32>"));
    assert!(not_a_struct(&Complex { re: 1.0, im: 1.0 }).contains("Complex"));
}

#[test]
fn test_not_a_struct_message() {
    let err = encode(&5u8).unwrap_err();
    assert_eq!(err.to_string(), "passed value (type: u8) is not a struct");
}

#[test]
fn test_ignore() {
    #[derive(QueryRecord)]
    struct Ignored {
        #[qs("-")]
        Int: i32,
        #[qs("-")]
        String: String,
    }

    assert_eq!(
        encoded(&Ignored {
            Int: 10,
            String: "foo".to_string(),
        }),
        ""
    );
}

#[test]
fn test_struct_basic() {
    let mut p = person("foo", 10);
    p.location = "home".to_string();
    assert_eq!(encoded(&p), "age=10&name=foo");
}

#[test]
fn test_ptr_indirection() {
    #[derive(QueryRecord)]
    struct Indirect<'a> {
        Age: Option<Box<Option<&'a i32>>>,
        Name: Option<&'a String>,
    }

    let i = 10;
    let n = "foo".to_string();
    assert_eq!(
        encoded(&Indirect {
            Age: Some(Box::new(Some(&i))),
            Name: Some(&n),
        }),
        "Age=10&Name=foo"
    );
}

#[test]
fn test_absent_reference_renders_empty() {
    #[derive(QueryRecord)]
    struct Indirect<'a> {
        Age: Option<Box<Option<&'a i32>>>,
        Name: Option<String>,
    }

    assert_eq!(
        encoded(&Indirect {
            Age: Some(Box::new(None)),
            Name: None,
        }),
        "Age=&Name="
    );
}

#[test]
fn test_struct_omit_empty_all() {
    #[derive(QueryRecord, Default)]
    struct AllEmpty {
        #[qs("i,omitempty")]
        Int: i32,
        #[qs("s,omitempty")]
        String: String,
        #[qs("err,omitempty")]
        Error: Option<String>,
    }

    assert_eq!(encoded(&AllEmpty::default()), "");
}

#[test]
fn test_omit_empty_keeps_present_zero_behind_option() {
    #[derive(QueryRecord)]
    struct Limit {
        #[qs("limit,omitempty")]
        limit: Option<u32>,
    }

    assert_eq!(encoded(&Limit { limit: Some(0) }), "limit=0");
    assert_eq!(encoded(&Limit { limit: None }), "");
}

#[test]
fn test_struct_stringer() {
    let child = Person {
        parent: Some(Box::new(person("dad", 30))),
        ..person("child", 5)
    };
    assert_eq!(encoded(&child), "age=5&name=child&parent=dad");
}

#[test]
fn test_empty_struct_tag() {
    #[derive(QueryRecord)]
    struct EmptyTags {
        #[qs("")]
        Int: i32,
        #[qs("")]
        String: String,
    }

    assert_eq!(
        encoded(&EmptyTags {
            Int: 10,
            String: "foo".to_string(),
        }),
        "Int=10&String=foo"
    );
}

#[test]
fn test_default_names() {
    #[derive(QueryRecord)]
    struct DefaultNames {
        #[qs(",omitempty")]
        Int: i32,
        String: String,
    }

    assert_eq!(
        encoded(&DefaultNames {
            Int: 10,
            String: "foo".to_string(),
        }),
        "Int=10&String=foo"
    );
}

#[test]
fn test_raw_identifier_field_name() {
    #[derive(QueryRecord)]
    struct Filter {
        r#type: &'static str,
    }

    assert_eq!(encoded(&Filter { r#type: "image" }), "type=image");
}

#[test]
fn test_struct_slice() {
    #[derive(QueryRecord)]
    struct Friends {
        #[qs("f")]
        friends: Vec<String>,
    }

    let friends = Friends {
        friends: vec!["foo".into(), "bar".into(), "qux".into()],
    };
    assert_eq!(encoded(&friends), "f=foo&f=bar&f=qux");
}

#[test]
fn test_struct_slice_ptr() {
    #[derive(QueryRecord)]
    struct Friends<'a> {
        #[qs("f")]
        friends: Option<&'a [&'a str]>,
    }

    let names = ["foo", "bar", "qux"];
    assert_eq!(
        encoded(&Friends {
            friends: Some(&names[..]),
        }),
        "f=foo&f=bar&f=qux"
    );
    assert_eq!(encoded(&Friends { friends: None }), "f=");
}

#[test]
fn test_empty_sequence_emits_nothing() {
    #[derive(QueryRecord)]
    struct Tags {
        tag: Vec<String>,
        page: u32,
    }

    assert_eq!(
        encoded(&Tags {
            tag: Vec::new(),
            page: 2,
        }),
        "page=2"
    );
}

#[test]
fn test_sequence_elements_render_like_scalars() {
    #[derive(QueryRecord)]
    struct Mixed {
        ids: [u16; 3],
        maybe: Vec<Option<bool>>,
        people: Vec<Person>,
    }

    let values = encode(&Mixed {
        ids: [3, 1, 2],
        maybe: vec![Some(true), None, Some(false)],
        people: vec![person("ann", 1), person("bob", 2)],
    })
    .unwrap();

    assert_eq!(values.get_all("ids"), ["3", "1", "2"]);
    assert_eq!(values.get_all("maybe"), ["true", "", "false"]);
    assert_eq!(values.get_all("people"), ["ann", "bob"]);
}

#[test]
fn test_allowed_fields() {
    #[derive(QueryRecord)]
    struct B {
        X: bool,
    }
    #[derive(QueryRecord)]
    struct U {
        X: u64,
    }
    #[derive(QueryRecord)]
    struct F {
        X: f64,
    }
    #[derive(QueryRecord)]
    struct C {
        X: char,
    }

    assert_eq!(encoded(&B { X: true }), "X=true");
    assert_eq!(encoded(&U { X: 10 }), "X=10");
    assert_eq!(encoded(&F { X: 10.123 }), "X=10.123");
    assert_eq!(encoded(&C { X: 'z' }), "X=z");
}

/// A complex number with no textual query form.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Complex {
    re: f64,
    im: f64,
}

impl QueryValue for Complex {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Unsupported(ValueKind::Complex)
    }

    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

#[test]
fn test_disallowed_fields() {
    #[derive(QueryRecord)]
    struct WithComplex {
        X: Complex,
    }
    #[derive(QueryRecord)]
    struct WithChannel {
        X: mpsc::Sender<i32>,
    }
    #[derive(QueryRecord)]
    struct WithFunc {
        X: fn(),
    }
    #[derive(QueryRecord)]
    struct WithMap {
        X: HashMap<i32, i32>,
    }
    #[derive(QueryRecord)]
    struct WithPointer {
        X: *const i32,
    }

    let (tx, _rx) = mpsc::channel();
    let value = 1;

    assert_eq!(
        unsupported_kind(&WithComplex {
            X: Complex { re: 10.0, im: 10.0 },
        }),
        ValueKind::Complex
    );
    assert_eq!(unsupported_kind(&WithChannel { X: tx }), ValueKind::Channel);
    assert_eq!(unsupported_kind(&WithFunc { X: || {} }), ValueKind::Callable);
    assert_eq!(
        unsupported_kind(&WithMap {
            X: HashMap::from([(0, 0), (1, 1)]),
        }),
        ValueKind::Map
    );
    assert_eq!(
        unsupported_kind(&WithPointer { X: &value }),
        ValueKind::RawPointer
    );
}

#[test]
fn test_unsupported_error_carries_declared_type() {
    #[derive(QueryRecord)]
    struct Lookup {
        name: String,
        table: HashMap<String, String>,
    }

    let err = encode(&Lookup {
        name: "x".into(),
        table: HashMap::new(),
    })
    .unwrap_err();

    match &err {
        Error::UnsupportedType {
            field,
            type_name,
            kind,
        } => {
            assert_eq!(field, "table");
            assert!(type_name.contains("HashMap<"));
            assert_eq!(*kind, ValueKind::Map);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("type cannot be serialized: "));
    assert_eq!(err.error_code(), "UNSUPPORTED_TYPE");
}

#[test]
fn test_empty_disallowed_field_with_omitempty() {
    #[derive(QueryRecord)]
    struct Optional {
        #[qs("m,omitempty")]
        map: HashMap<i32, i32>,
        #[qs("p,omitempty")]
        ptr: *const u8,
        #[qs("n")]
        name: &'static str,
    }

    assert_eq!(
        encoded(&Optional {
            map: HashMap::new(),
            ptr: std::ptr::null(),
            name: "x",
        }),
        "n=x"
    );
}

#[test]
fn test_nested_record_without_display_is_rejected() {
    #[derive(QueryRecord)]
    struct Inner {
        id: u32,
    }
    #[derive(QueryRecord)]
    struct Outer {
        inner: Inner,
    }

    assert_eq!(
        unsupported_kind(&Outer {
            inner: Inner { id: 1 },
        }),
        ValueKind::Record
    );
}

#[test]
fn test_nested_record_zero_value_is_omitted() {
    #[derive(QueryRecord)]
    struct Inner {
        id: u32,
        tags: Vec<String>,
    }
    #[derive(QueryRecord)]
    struct Outer {
        #[qs("inner,omitempty")]
        inner: Inner,
        page: u32,
    }

    assert_eq!(
        encoded(&Outer {
            inner: Inner {
                id: 0,
                tags: Vec::new(),
            },
            page: 1,
        }),
        "page=1"
    );
}

#[test]
fn test_nested_sequence_is_rejected() {
    #[derive(QueryRecord)]
    struct Grid {
        rows: Vec<Vec<u8>>,
    }

    assert_eq!(
        unsupported_kind(&Grid {
            rows: vec![vec![1, 2]],
        }),
        ValueKind::Sequence
    );
}

#[test]
fn test_generic_record() {
    #[derive(QueryRecord)]
    struct Page<T> {
        #[qs("item")]
        items: Vec<T>,
        #[qs("limit,omitempty")]
        limit: u32,
    }

    assert_eq!(
        encoded(&Page {
            items: vec![1u8, 2],
            limit: 0,
        }),
        "item=1&item=2"
    );
}

#[test]
fn test_field_order_is_declaration_order() {
    #[derive(QueryRecord)]
    struct Ordered {
        zeta: u8,
        alpha: u8,
        mid: Vec<u8>,
    }

    let values = encode(&Ordered {
        zeta: 1,
        alpha: 2,
        mid: vec![3, 4],
    })
    .unwrap();
    assert_eq!(values.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(values.to_query_string(), "alpha=2&mid=3&mid=4&zeta=1");
}

#[test]
fn test_encoder_combines_records() {
    #[derive(QueryRecord)]
    struct Paging {
        #[qs("limit,omitempty")]
        limit: u32,
        #[qs("offset,omitempty")]
        offset: u32,
    }

    let mut encoder = FieldEncoder::new();
    encoder
        .encode(&person("foo", 10))
        .unwrap()
        .encode(&Paging {
            limit: 50,
            offset: 0,
        })
        .unwrap();

    assert_eq!(
        encoder.finish().to_query_string(),
        "age=10&limit=50&name=foo"
    );
}

#[test]
fn test_end_to_end_example() {
    #[derive(QueryRecord)]
    struct QueryParams {
        #[qs("q")]
        Query: String,
        #[qs("num,omitempty")]
        Count: i32,
        #[qs("opt")]
        Opt: Vec<String>,
    }

    let p = QueryParams {
        Query: "apple pie".to_string(),
        Count: 10,
        Opt: vec!["safe".to_string(), "localized".to_string()],
    };

    assert_eq!(encoded(&p), "num=10&opt=safe&opt=localized&q=apple+pie");
}

#[cfg(feature = "uuid")]
#[test]
fn test_uuid_fields() {
    #[derive(QueryRecord)]
    struct ByOwner {
        #[qs("owner_uuid,omitempty")]
        owner: uuid::Uuid,
    }

    let owner = uuid::Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
    assert_eq!(
        encoded(&ByOwner { owner }),
        "owner_uuid=550e8400-e29b-41d4-a716-446655440000"
    );
    assert_eq!(
        encoded(&ByOwner {
            owner: uuid::Uuid::nil(),
        }),
        ""
    );
}

#[cfg(feature = "chrono")]
#[test]
fn test_chrono_fields() {
    #[derive(QueryRecord)]
    struct Since {
        #[qs("since,omitempty")]
        since: Option<chrono::NaiveDate>,
    }

    let since = chrono::NaiveDate::from_ymd_opt(2024, 1, 31);
    assert_eq!(encoded(&Since { since }), "since=2024-01-31");
    assert_eq!(encoded(&Since { since: None }), "");
}
