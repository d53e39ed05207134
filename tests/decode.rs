//! Integration tests for signature decoding through the public API.
//!
//! This module decodes signatures the way an importing compiler does: embedded in a metadata
//! buffer, as standalone descriptors, and through a factory defined outside the crate.

use std::sync::atomic::{AtomicUsize, Ordering};

use typesig::prelude::*;

/// Factory rendering every type back into a compact textual form, counting the calls it gets.
#[derive(Default)]
struct RenderingFactory {
    calls: AtomicUsize,
}

impl RenderingFactory {
    fn count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

impl TypeFactory for RenderingFactory {
    type Type = String;

    fn basic_type(&self, tag: TypeTag) -> String {
        self.tick();
        tag.name().to_string()
    }

    fn builtin_reference_type(&self, name: &str) -> String {
        self.tick();
        format!("builtin {name}")
    }

    fn reference_type(&self, tag: TypeTag, package_path: &str, name: &str) -> String {
        self.tick();
        format!("{} {package_path}/{name}", tag.name())
    }

    fn constrained_type(&self, tag: TypeTag, constraint: Option<String>) -> String {
        self.tick();
        match constraint {
            Some(inner) => format!("{}({inner})", tag.name()),
            None => tag.name().to_string(),
        }
    }

    fn array_type(&self, element: String, size: ArraySize) -> String {
        self.tick();
        format!("{element}[{size}]")
    }

    fn function_type(&self, parameters: Vec<String>, return_type: Option<String>) -> String {
        self.tick();
        format!(
            "fn({}) -> {}",
            parameters.join(", "),
            return_type.unwrap_or_else(|| "nothing".to_string())
        )
    }

    fn collection_type(&self, tag: TypeTag, members: Vec<String>) -> String {
        self.tick();
        format!("{}{{{}}}", tag.name(), members.join(", "))
    }
}

/// A record field of type `map<int[]>`, a function type and a union, stored back to back.
#[test]
fn test_metadata_buffer_walk() -> Result<()> {
    let buffer = "M[;IUSCmyorg/geo:1.2.0:Point;)(B)O3;ISN";
    let factory = RenderingFactory::default();

    let (field, end) = decode(&factory, buffer, 0)?;
    assert_eq!(field, "map(int[])");
    assert_eq!(end, 4);

    let (function, end) = decode(&factory, buffer, end)?;
    assert_eq!(
        function,
        "fn(string, record(record myorg/geo:1.2.0/Point)) -> boolean"
    );
    assert_eq!(end, 33);

    let (union, end) = decode(&factory, buffer, end)?;
    assert_eq!(union, "union{int, string, ()}");
    assert_eq!(end, buffer.len());

    Ok(())
}

#[test]
fn test_one_factory_call_per_type() -> Result<()> {
    let factory = RenderingFactory::default();
    decode_standalone(&factory, "UI[2;S)(O2;Cp/q:R;N)")?;

    // int, string, array, reference, record, nil, union, function
    assert_eq!(factory.count(), 8);
    Ok(())
}

#[test]
fn test_bare_unconstrained_forms() -> Result<()> {
    let factory = SigType::factory();
    for (text, tag) in [("E;", TypeTag::Error), ("T;", TypeTag::Table), ("H;", TypeTag::Stream)] {
        assert_eq!(
            decode_standalone(&factory, text)?,
            SigType::Constrained(tag, None)
        );
    }

    // the bare name itself carries no meaning for these tags
    assert_eq!(
        decode_standalone(&factory, "Eanything;")?,
        SigType::Constrained(TypeTag::Error, None)
    );

    assert!(matches!(
        decode_standalone(&factory, "XWidget;"),
        Err(Error::MalformedQualifiedName { position: 0, .. })
    ));
    Ok(())
}

#[test]
fn test_empty_qualified_name_is_passed_through() -> Result<()> {
    let factory = SigType::factory();
    assert_eq!(
        decode(&factory, "Cmyorg/geo:;", 0)?,
        (SigType::named(TypeTag::Record, "myorg/geo", ""), 12)
    );
    assert_eq!(
        decode_standalone(&factory, "Xmyorg/geo:2.0:;")?,
        SigType::named(TypeTag::Object, "myorg/geo:2.0", "")
    );
    Ok(())
}

#[test]
fn test_error_positions() {
    let factory = SigType::factory();
    let cases: [(&str, Error); 8] = [
        (
            "P2;I?",
            Error::UnrecognizedTag {
                tag: '?',
                position: 4,
            },
        ),
        ("[4;", Error::UnexpectedEnd { position: 3 }),
        (
            "RLongName",
            Error::Unterminated {
                position: 1,
                terminator: ';',
            },
        ),
        (
            "Cmyorg/geo:1.0:Point:x;",
            Error::MalformedQualifiedName {
                name: "myorg/geo:1.0:Point:x".to_string(),
                position: 0,
            },
        ),
        (
            "[four;I",
            Error::InvalidNumber {
                field: "four".to_string(),
                position: 1,
            },
        ),
        (
            "U)(IS",
            Error::UnexpectedCharacter {
                found: 'S',
                expected: ')',
                position: 4,
            },
        ),
        ("O1;IS", Error::TrailingCharacters { position: 4 }),
        ("", Error::Empty),
    ];

    for (text, expected) in cases {
        assert_eq!(decode_standalone(&factory, text), Err(expected), "{text}");
    }
}

#[test]
fn test_depth_limit() {
    let factory = SigType::factory();
    let within = "[;".repeat(63) + "I";
    let beyond = "[;".repeat(64) + "I";

    assert!(decode_standalone(&factory, &within).is_ok());
    assert_eq!(
        decode_standalone(&factory, &beyond),
        Err(Error::RecursionLimit(64))
    );

    let relaxed = DecoderConfig::default().with_max_depth(128);
    assert!(decode_standalone_with_config(&factory, &beyond, &relaxed).is_ok());
    assert!(decode_with_config(&factory, &beyond, 0, &relaxed).is_ok());
}

#[test]
fn test_hostile_input_is_rejected_without_panicking() {
    let factory = SigType::factory();
    let deep_functions = "U".repeat(10_000);
    let deep_unions = "O1;".repeat(10_000);
    for text in [
        "O99999999999999999999999;",
        "[18446744073709551616;I",
        "U",
        ")(",
        ";;;;",
        "Zä:ö:ü:x;",
        "R",
        "P1;",
        deep_functions.as_str(),
        deep_unions.as_str(),
    ] {
        assert!(decode_standalone(&factory, text).is_err(), "{text}");
    }
}
