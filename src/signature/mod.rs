//! Type signature decoding.
//!
//! Compiled modules persist the types they export as compact strings, one tag character per
//! (sub-)type followed by whatever trailing data that tag needs. This module turns such a string
//! back into a structured type through a caller-supplied [`crate::TypeFactory`].
//!
//! # Signature Grammar
//!
//! | Tag(s) | Category | Form |
//! |---|---|---|
//! | `I` `W` `F` `L` `S` `B` `Y` `A` `N` `K` `J` | basic | tag only |
//! | `R` | built-in reference | `R<name>;` |
//! | `C` `X` `Z` `E` `T` `H` | qualified reference | `<tag>[path:[version:]]name;` |
//! | `[` | array | `[<size>;<element>`, empty size for an unbounded array |
//! | `M` `Q` `G` | constrained | `<tag><inner>` |
//! | `U` | function | `U<params>)(<return or nothing>)` |
//! | `O` `P` | union, tuple | `<tag><count>;<members>` |
//!
//! The grammar is prefix-unambiguous: the tag alone decides how much input a type consumes, and
//! no construct ever needs backtracking.
//!
//! # Entry Points
//!
//! - [`decode`] - one signature embedded in a larger buffer, returns the end cursor
//! - [`decode_standalone`] - one self-contained descriptor, which must be consumed completely
//! - [`decode_sequence`] - all consecutive signatures in a buffer
//! - [`decode_all`] - many independent descriptors in parallel
//!
//! # Examples
//!
//! ```rust
//! use typesig::{decode, decode_standalone, SigType};
//!
//! let factory = SigType::factory();
//!
//! let (function, end) = decode(&factory, "UI)(I)", 0)?;
//! assert_eq!(end, 6);
//! assert_eq!(function.to_string(), "function(int) returns int");
//!
//! let union = decode_standalone(&factory, "O2;Cmyorg/geo:Point;N")?;
//! assert_eq!(union.to_string(), "(myorg/geo:Point|())");
//! # Ok::<(), typesig::Error>(())
//! ```

mod batch;
mod cursor;
mod decoder;
mod qualified;
mod standalone;
mod tags;

pub use batch::{decode_all, decode_all_embedded, decode_all_with_config};
pub use cursor::Cursor;
pub use decoder::SignatureDecoder;
pub use qualified::QualifiedName;
pub use tags::{TagCategory, TypeTag, TYPE_TAG};

use log::debug;

use crate::{config::DecoderConfig, factory::TypeFactory, Error, Result};

/// Decode one signature embedded in `buffer`, starting at `start`.
///
/// Returns the decoded type together with the cursor one past the consumed text; whatever
/// follows belongs to the caller.
///
/// ## Arguments
/// * `factory` - Builds the decoded type
/// * `buffer` - The buffer holding the signature
/// * `start` - Byte offset at which the signature starts
///
/// # Errors
/// Returns an error if the signature is malformed or truncated.
pub fn decode<F: TypeFactory>(factory: &F, buffer: &str, start: usize) -> Result<(F::Type, usize)> {
    decode_with_config(factory, buffer, start, &DecoderConfig::default())
}

/// Decode one embedded signature with an explicit configuration.
///
/// # Errors
/// Returns an error if the signature is malformed, truncated or nests too deep.
pub fn decode_with_config<F: TypeFactory>(
    factory: &F,
    buffer: &str,
    start: usize,
    config: &DecoderConfig,
) -> Result<(F::Type, usize)> {
    let result = SignatureDecoder::at(factory, buffer, start, *config).and_then(|mut decoder| {
        let ty = decoder.decode_next()?;
        Ok((ty, decoder.pos()))
    });

    match &result {
        Ok((_, end)) => debug!("decoded signature {}..{}", start, end),
        Err(error) => debug!("failed to decode signature at {}: {}", start, error),
    }

    result
}

/// Decode a self-contained type descriptor.
///
/// The descriptor must hold exactly one type, with nothing before or after it.
///
/// # Errors
/// Returns [`crate::Error::Empty`] for an empty descriptor,
/// [`crate::Error::TrailingCharacters`] if it holds more than one type, or any decode error.
pub fn decode_standalone<F: TypeFactory>(factory: &F, descriptor: &str) -> Result<F::Type> {
    decode_standalone_with_config(factory, descriptor, &DecoderConfig::default())
}

/// Decode a self-contained type descriptor with an explicit configuration.
///
/// # Errors
/// See [`decode_standalone`].
pub fn decode_standalone_with_config<F: TypeFactory>(
    factory: &F,
    descriptor: &str,
    config: &DecoderConfig,
) -> Result<F::Type> {
    if descriptor.is_empty() {
        return Err(Error::Empty);
    }

    let result = standalone::decode_descriptor(factory, descriptor, 0, 0, config);
    if let Err(error) = &result {
        debug!("failed to decode descriptor '{}': {}", descriptor, error);
    }

    result
}

/// Decode every signature in `buffer`, back to back, until the buffer is exhausted.
///
/// # Errors
/// Returns the first decode error; no partial list is returned.
pub fn decode_sequence<F: TypeFactory>(factory: &F, buffer: &str) -> Result<Vec<F::Type>> {
    let mut decoder = SignatureDecoder::new(factory, buffer);
    let mut types = Vec::new();
    while decoder.has_more_data() {
        types.push(decoder.decode_next()?);
    }

    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{ArraySize, SigType};

    fn int() -> SigType {
        SigType::Basic(TypeTag::Int)
    }

    #[test]
    fn test_scenarios() {
        let factory = SigType::factory();

        assert_eq!(decode(&factory, "I", 0).unwrap(), (int(), 1));
        assert_eq!(
            decode(&factory, "[3;I", 0).unwrap(),
            (SigType::Array(Box::new(int()), ArraySize::Fixed(3)), 4)
        );
        assert_eq!(
            decode(&factory, "U)()", 0).unwrap(),
            (
                SigType::Function {
                    parameters: vec![],
                    return_type: None
                },
                4
            )
        );
        assert_eq!(
            decode(&factory, "UI)(I)", 0).unwrap(),
            (
                SigType::Function {
                    parameters: vec![int()],
                    return_type: Some(Box::new(int()))
                },
                6
            )
        );
        assert_eq!(
            decode(&factory, "O2;II", 0).unwrap(),
            (SigType::Collection(TypeTag::Union, vec![int(), int()]), 5)
        );
        assert_eq!(
            decode(&factory, "MI", 0).unwrap(),
            (SigType::Constrained(TypeTag::Map, Some(Box::new(int()))), 2)
        );
    }

    #[test]
    fn test_decode_leaves_trailing_input() {
        let factory = SigType::factory();
        assert_eq!(decode(&factory, "MI;trailer", 0).unwrap().1, 2);
    }

    #[test]
    fn test_decode_start_inside_character() {
        let factory = SigType::factory();
        assert_eq!(
            decode(&factory, "äI", 1),
            Err(Error::NotCharBoundary { position: 1 })
        );
        assert_eq!(decode(&factory, "äI", 2).unwrap(), (int(), 3));
    }

    #[test]
    fn test_standalone_empty() {
        assert_eq!(
            decode_standalone(&SigType::factory(), ""),
            Err(Error::Empty)
        );
    }

    #[test]
    fn test_standalone_matches_embedded() {
        let factory = SigType::factory();
        for text in ["I", "Rxml;", "T;", "Ca:b;", "[2;S", "QI", "UI)()", "P2;SI"] {
            let (embedded, end) = decode(&factory, text, 0).unwrap();
            assert_eq!(end, text.len());
            assert_eq!(decode_standalone(&factory, text).unwrap(), embedded);
        }
    }

    #[test]
    fn test_decode_sequence() {
        let factory = SigType::factory();
        let types = decode_sequence(&factory, "ISRxml;[;B").unwrap();
        assert_eq!(types.len(), 4);
        assert_eq!(types[2], SigType::Builtin("xml".to_string()));

        assert!(decode_sequence(&factory, "").unwrap().is_empty());
        assert!(decode_sequence(&factory, "IS?").is_err());
    }

    #[test]
    fn test_determinism() {
        let factory = SigType::factory();
        let text = "UP2;ICorg/p:1.0:R;[;MS)(O3;INT;)";
        let first = decode(&factory, text, 0).unwrap();
        let second = decode(&factory, text, 0).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.1, text.len());
    }
}
