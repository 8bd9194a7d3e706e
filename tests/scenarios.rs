use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use sieve::validation::{shared, Converted, Present};
use sieve::{Context, Element, Path, Schema, Step, Value};

fn registration_schema() -> Schema {
    Schema::form(vec![
        ("name", Schema::text().validated_by(vec![shared(Present)])),
        ("age", Schema::integer().validated_by(vec![shared(Converted)])),
        ("phones", Schema::list(Schema::text())),
    ])
}

#[derive(Deserialize)]
struct TestCase {
    name: String,
    raw: serde_json::Value,
    valid: bool,
}

#[test]
fn registration_form_cases() {
    let cases: Vec<TestCase> = serde_json::from_value(json!([
        {
            "name": "all fields good, age coerced from text",
            "raw": {"name": "Ann", "age": "30", "phones": ["+44 1234567"]},
            "valid": true
        },
        {
            "name": "age already native",
            "raw": {"name": "Ann", "age": 30, "phones": []},
            "valid": true
        },
        {
            "name": "age is garbage",
            "raw": {"name": "Ann", "age": "abc", "phones": []},
            "valid": false
        },
        {
            "name": "name missing",
            "raw": {"age": "30", "phones": []},
            "valid": false
        },
        {
            "name": "not a mapping at all",
            "raw": 42,
            "valid": false
        }
    ]))
    .unwrap();

    let schema = registration_schema();
    for case in cases {
        let raw: Value = serde_json::from_value(case.raw).unwrap();
        let mut element = schema.from_raw(raw);
        assert_eq!(element.validate(), case.valid, "case: {}", case.name);
        assert_eq!(element.is_valid(), Some(case.valid), "case: {}", case.name);
    }
}

#[test]
fn integer_scalar_scenario() {
    let mut element = Schema::integer().from_raw("42");
    assert_eq!(element.value(), Value::Int(42));
    assert_eq!(*element.raw_value(), Value::from("42"));
    assert!(element.validate());

    let mut element = Schema::integer().from_raw("abc");
    assert_eq!(element.value(), Value::NotUnserializable);
    assert!(!element.validate());
}

#[test]
fn boolean_rejects_numeric_coercion() {
    assert_eq!(Schema::boolean().from_raw("True").value(), Value::Bool(true));
    assert_eq!(
        Schema::boolean().from_raw("1").value(),
        Value::NotUnserializable
    );
    assert_eq!(
        Schema::boolean().from_raw(1).value(),
        Value::NotUnserializable
    );
}

#[test]
fn fixed_record_scenario() {
    let schema = Schema::form(vec![("name", Schema::text()), ("age", Schema::integer())]);

    let raw: Value = serde_json::from_value(json!({"name": "Ann", "age": "30"})).unwrap();
    let element = schema.from_raw(raw);
    assert_eq!(
        element.value(),
        Value::Map(vec![
            (Value::from("name"), Value::from("Ann")),
            (Value::from("age"), Value::Int(30)),
        ])
    );

    let raw: Value = serde_json::from_value(json!({"name": "Ann"})).unwrap();
    let element = schema.from_raw(raw);
    assert_eq!(element.value(), Value::NotUnserializable);
    assert_eq!(element.field("name").unwrap().value(), Value::from("Ann"));
}

#[test]
fn tuple_arity_mismatch_scenario() {
    let schema = Schema::tuple(vec![Schema::integer(), Schema::integer()]);
    let mut element = schema.from_raw(Value::Seq(vec![1.into(), 2.into(), 3.into()]));
    assert_eq!(element.value(), Value::NotUnserializable);
    assert!(!element.validate());
}

#[test]
fn mapping_traverse_ordering_scenario() {
    let schema = Schema::dict(Schema::text(), Schema::integer());
    let element = schema.from_raw(Value::Map(vec![(Value::from("foo"), Value::Int(1))]));
    let entries: Vec<(Path, Value)> = element
        .traverse()
        .map(|(path, element)| (path, element.value()))
        .collect();
    assert_eq!(
        entries,
        [
            (
                Path::from(vec![Step::Index(0), Step::Index(0)]),
                Value::from("foo")
            ),
            (
                Path::from(vec![Step::Index(0), Step::Index(1)]),
                Value::Int(1)
            ),
        ]
    );
}

#[test]
fn container_fold_law() {
    // every child fine: the aggregate is the structural assembly in order
    let list = Schema::list(Schema::integer());
    let element = list.from_raw(Value::Seq(vec!["1".into(), "2".into(), "3".into()]));
    assert_eq!(
        element.value(),
        Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );

    // one bad child anywhere: the aggregate collapses, at every level
    let nested = Schema::form(vec![(
        "rows",
        Schema::list(Schema::tuple(vec![Schema::text(), Schema::integer()])),
    )]);
    let raw: Value =
        serde_json::from_value(json!({"rows": [["a", "1"], ["b", "nope"]]})).unwrap();
    let element = nested.from_raw(raw);
    assert_eq!(element.value(), Value::NotUnserializable);
    let rows = element.field("rows").unwrap();
    assert_eq!(rows.value(), Value::NotUnserializable);
    assert_eq!(
        rows.get(0).unwrap().value(),
        Value::Seq(vec![Value::from("a"), Value::Int(1)])
    );
}

#[test]
fn validation_is_exhaustive_not_short_circuited() {
    let invocations = Arc::new(AtomicUsize::new(0));
    let counting = {
        let invocations = Arc::clone(&invocations);
        move |element: &mut Element, _: &Context| {
            invocations.fetch_add(1, Ordering::SeqCst);
            !element.value().is_sentinel()
        }
    };
    let schema = Schema::list(Schema::integer().validated_by(vec![shared(counting)]));
    let mut element = schema.from_raw(Value::Seq(vec!["x".into(), "2".into(), "3".into()]));
    assert!(!element.validate());
    assert_eq!(invocations.load(Ordering::SeqCst), 3);
}

#[test]
fn failing_validators_all_run_and_all_report() {
    let schema = Schema::integer().validated_by(vec![
        shared(|element: &mut Element, _: &Context| {
            element.add_error("first");
            false
        }),
        shared(|element: &mut Element, _: &Context| {
            element.add_error("second");
            false
        }),
    ]);
    let mut element = schema.from_raw("1");
    assert!(!element.validate());
    assert_eq!(element.errors(), ["first", "second"]);

    // a fresh pass replaces the messages instead of accumulating them
    assert!(!element.validate());
    assert_eq!(element.errors(), ["first", "second"]);
}

#[test]
fn context_reaches_every_validator() {
    let schema = Schema::list(Schema::integer().validated_by(vec![shared(
        |element: &mut Element, context: &Context| {
            let minimum = match context.get("minimum") {
                Some(Value::Int(minimum)) => *minimum,
                _ => 0,
            };
            match element.value() {
                Value::Int(i) if i >= minimum => true,
                _ => {
                    element.add_error("too small");
                    false
                }
            }
        },
    )]));
    let mut element = schema.from_raw(Value::Seq(vec!["3".into(), "30".into()]));

    let mut context = Context::new();
    context.insert("minimum".to_owned(), Value::Int(10));
    assert!(!element.validate_in(&context));
    assert_eq!(element.get(0).unwrap().errors(), ["too small"]);
    assert!(element.get(1).unwrap().errors().is_empty());
}

#[test]
fn sentinel_distinctness() {
    assert_ne!(Value::Unspecified, Value::NotUnserializable);
    assert!(!Value::Unspecified.is_truthy());
    assert!(!Value::NotUnserializable.is_truthy());
    assert_eq!(Value::Unspecified.to_string(), "");
    assert_eq!(Value::NotUnserializable.to_string(), "");
}

#[test]
fn idempotent_re_set() {
    let schema = Schema::form(vec![("age", Schema::integer())]);
    let raw: Value = serde_json::from_value(json!({"age": "30"})).unwrap();
    let mut element = schema.from_raw(raw.clone());
    let first = (element.value(), element.raw_value().clone());
    element.validate();
    element.set_from_raw(raw);
    assert_eq!(element.is_valid(), None);
    assert_eq!((element.value(), element.raw_value().clone()), first);
}

#[test]
fn scalar_round_trips() {
    let cases = vec![
        (Schema::boolean(), Value::Bool(true)),
        (Schema::integer(), Value::Int(42)),
        (Schema::float(), Value::Float(1.5)),
        (Schema::complex(), Value::Complex(1.0, -2.0)),
        (Schema::text(), Value::from("héllo")),
        (Schema::bytes(), Value::Bytes(vec![0, 159, 146, 150])),
    ];
    for (schema, value) in cases {
        assert_eq!(schema.unserialize(&schema.serialize(&value)), value);
    }
}

#[test]
fn field_validator_hook_attaches_to_the_named_field() {
    let schema = Schema::form(vec![("spam", Schema::text())]).with_field_validator(
        "spam",
        shared(|element: &mut Element, _: &Context| {
            let ok = element.value() == Value::from("spam");
            if !ok {
                element.add_error("Must be spam.");
            }
            ok
        }),
    );

    let raw: Value = serde_json::from_value(json!({"spam": "spam"})).unwrap();
    assert!(schema.from_raw(raw).validate());

    let raw: Value = serde_json::from_value(json!({"spam": "eggs"})).unwrap();
    let mut element = schema.from_raw(raw);
    assert!(!element.validate());
    assert_eq!(element.field("spam").unwrap().errors(), ["Must be spam."]);
}

#[test]
fn encoding_is_configured_per_schema() {
    let utf8 = Schema::text();
    let latin1 = Schema::text().with_encoding(sieve::Encoding::Latin1);
    let raw = Value::Bytes(vec![b'h', 0xe9]);
    assert_eq!(utf8.from_raw(raw.clone()).value(), Value::NotUnserializable);
    assert_eq!(latin1.from_raw(raw).value(), Value::from("hé"));
}

#[test]
fn published_schemas_are_shared_across_threads() {
    let schema = Arc::new(registration_schema());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = Arc::clone(&schema);
            std::thread::spawn(move || {
                let raw: Value = serde_json::from_value(json!({
                    "name": format!("user-{}", i),
                    "age": format!("{}", 20 + i),
                    "phones": [],
                }))
                .unwrap();
                let mut element = schema.from_raw(raw);
                element.validate()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn properties_ride_along_for_consumers() {
    let schema = Schema::text()
        .with_property("label", "Name")
        .with_property("hint", "as on your passport");
    let element = schema.from_raw("Ann");
    assert_eq!(element.properties().get("label"), Some(&Value::from("Name")));
    assert_eq!(
        element.properties().get("hint"),
        Some(&Value::from("as on your passport"))
    );
}

#[test]
fn error_report_renders_with_json_pointers() {
    let schema = registration_schema();
    let raw: Value = serde_json::from_value(json!({
        "age": "abc",
        "phones": ["+44 1234567", []],
    }))
    .unwrap();
    let mut element = schema.from_raw(raw);
    assert!(!element.validate());

    let mut report: Vec<(String, Vec<String>)> = element
        .traverse()
        .filter(|(_, element)| element.is_valid() == Some(false))
        .map(|(path, element)| (path.to_string(), element.errors().to_vec()))
        .collect();
    report.sort();
    assert_eq!(
        report,
        [
            ("/age".to_owned(), vec!["Not a valid value.".to_owned()]),
            ("/name".to_owned(), vec!["May not be blank.".to_owned()]),
            ("/phones/1".to_owned(), vec![]),
        ]
    );
}
