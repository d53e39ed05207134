//! Parallel decoding of many independent signatures.
//!
//! A compiled module carries one signature per exported type, function and field, and none of
//! them shares a cursor with another. They can therefore be decoded on all cores at once against
//! one shared, thread-safe [`TypeFactory`] such as [`crate::TypeArena`].

use log::debug;
use rayon::prelude::*;

use crate::{
    config::DecoderConfig,
    factory::TypeFactory,
    signature::{decode_standalone_with_config, decode_with_config},
    Result,
};

/// Decode a batch of standalone descriptors in parallel.
///
/// Results are returned in input order; a failing descriptor does not affect the others.
///
/// # Examples
///
/// ```rust
/// use typesig::{decode_all, TypeArena};
///
/// let arena = TypeArena::new();
/// let results = decode_all(&arena, &["I", "[3;I", "#"]);
/// assert!(results[0].is_ok());
/// assert!(results[1].is_ok());
/// assert!(results[2].is_err());
/// ```
pub fn decode_all<F, S>(factory: &F, descriptors: &[S]) -> Vec<Result<F::Type>>
where
    F: TypeFactory + Sync,
    F::Type: Send,
    S: AsRef<str> + Sync,
{
    decode_all_with_config(factory, descriptors, &DecoderConfig::default())
}

/// Decode a batch of standalone descriptors in parallel with an explicit configuration.
pub fn decode_all_with_config<F, S>(
    factory: &F,
    descriptors: &[S],
    config: &DecoderConfig,
) -> Vec<Result<F::Type>>
where
    F: TypeFactory + Sync,
    F::Type: Send,
    S: AsRef<str> + Sync,
{
    debug!("decoding {} descriptors", descriptors.len());

    descriptors
        .par_iter()
        .map(|descriptor| decode_standalone_with_config(factory, descriptor.as_ref(), config))
        .collect()
}

/// Decode signatures embedded in one buffer at the given start offsets, in parallel.
///
/// Each result carries the end cursor of its signature.
pub fn decode_all_embedded<F>(
    factory: &F,
    buffer: &str,
    starts: &[usize],
) -> Vec<Result<(F::Type, usize)>>
where
    F: TypeFactory + Sync,
    F::Type: Send,
{
    let config = DecoderConfig::default();
    debug!("decoding {} embedded signatures", starts.len());

    starts
        .par_iter()
        .map(|&start| decode_with_config(factory, buffer, start, &config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        factory::{SigType, TypeArena},
        signature::TypeTag,
        Error,
    };

    #[test]
    fn test_decode_all_preserves_order() {
        let descriptors: Vec<String> = (0..64).map(|size| format!("[{size};I")).collect();
        let results = decode_all(&SigType::factory(), &descriptors);

        assert_eq!(results.len(), 64);
        for (size, result) in results.into_iter().enumerate() {
            assert_eq!(
                result.unwrap().to_string(),
                format!("int[{size}]")
            );
        }
    }

    #[test]
    fn test_decode_all_isolates_failures() {
        let results = decode_all(&SigType::factory(), &["I", "", "O1;", "S"]);
        assert_eq!(results[0], Ok(SigType::Basic(TypeTag::Int)));
        assert_eq!(results[1], Err(Error::Empty));
        assert_eq!(results[2], Err(Error::UnexpectedEnd { position: 3 }));
        assert_eq!(results[3], Ok(SigType::Basic(TypeTag::String)));
    }

    #[test]
    fn test_decode_all_shares_arena() {
        let arena = TypeArena::new();
        let descriptors = vec!["MCorg/p:Rec;"; 100];
        let ids: Vec<_> = decode_all(&arena, &descriptors)
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();

        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(arena.undefined().len(), 1);
    }

    #[test]
    fn test_decode_all_embedded() {
        let buffer = "IUI)(S)O2;IN";
        let results = decode_all_embedded(&SigType::factory(), buffer, &[0, 1, 7, 12]);

        assert_eq!(results[0].as_ref().unwrap().1, 1);
        assert_eq!(results[1].as_ref().unwrap().1, 7);
        assert_eq!(results[2].as_ref().unwrap().1, 12);
        assert_eq!(results[3], Err(Error::UnexpectedEnd { position: 12 }));
    }
}
