//! Decoding of self-contained type descriptors.
//!
//! A descriptor is a signature that stands on its own, with no surrounding buffer: the whole
//! string is exactly one type. Scalar, built-in, qualified, array and constrained descriptors are
//! parsed in place, with the element of an array and the inner type of a constrained type being
//! descriptors themselves. Function and collection descriptors go through the
//! [`SignatureDecoder`] over the descriptor's own characters.

use log::trace;

use crate::{
    config::DecoderConfig,
    factory::TypeFactory,
    signature::{
        cursor::Cursor,
        decoder::{build_qualified, read_array_size, read_tag, SignatureDecoder},
        tags::TagCategory,
    },
    Error, Result,
};

/// Decode the descriptor occupying `text[start..]`.
///
/// ## Arguments
/// * `factory` - Builds the decoded type
/// * `text` - The descriptor, `start` is 0 for callers and moves forward for nested descriptors
/// * `start` - Byte offset at which the (nested) descriptor starts
/// * `depth` - Nesting depth already reached by the caller
/// * `config` - Limits and separators for this decode
pub(crate) fn decode_descriptor<F: TypeFactory>(
    factory: &F,
    text: &str,
    start: usize,
    depth: usize,
    config: &DecoderConfig,
) -> Result<F::Type> {
    if depth >= config.max_depth {
        return Err(Error::RecursionLimit(config.max_depth));
    }

    let mut cursor = Cursor::at(text, start)?;
    let tag = read_tag(&mut cursor)?;
    trace!("descriptor {} at {} (depth {})", tag.name(), start, depth + 1);

    let ty = match tag.category() {
        TagCategory::Basic => factory.basic_type(tag),
        TagCategory::BuiltinReference => {
            let name = cursor.read_terminated()?;
            factory.builtin_reference_type(name)
        }
        TagCategory::Qualified => {
            let body = cursor.read_terminated()?;
            build_qualified(factory, tag, body, start, config)?
        }
        TagCategory::Array => {
            let size = read_array_size(&mut cursor)?;
            let element = decode_descriptor(factory, text, cursor.pos(), depth + 1, config)?;
            return Ok(factory.array_type(element, size));
        }
        TagCategory::Constrained => {
            let inner = decode_descriptor(factory, text, cursor.pos(), depth + 1, config)?;
            return Ok(factory.constrained_type(tag, Some(inner)));
        }
        TagCategory::Function | TagCategory::Collection => {
            let mut decoder = SignatureDecoder::at(factory, text, start, *config)?.with_depth(depth);
            let ty = decoder.decode_next()?;
            ensure_consumed(decoder.pos(), text)?;
            return Ok(ty);
        }
    };

    ensure_consumed(cursor.pos(), text)?;
    Ok(ty)
}

fn ensure_consumed(position: usize, text: &str) -> Result<()> {
    if position < text.len() {
        return Err(Error::TrailingCharacters { position });
    }

    Ok(())
}
