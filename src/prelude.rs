//! # typesig Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the typesig library. Import this module to get quick access to everything needed to
//! decode signatures and build types from them.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all typesig operations
pub use crate::Error;

/// The result type used throughout typesig
pub use crate::Result;

/// Limits and separators for a decode
pub use crate::DecoderConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Single signature decoding, embedded and standalone
pub use crate::signature::{
    decode, decode_sequence, decode_standalone, decode_standalone_with_config, decode_with_config,
};

/// Parallel batch decoding
pub use crate::signature::{decode_all, decode_all_embedded, decode_all_with_config};

// ================================================================================================
// Signature Grammar
// ================================================================================================

/// Low-level decoding building blocks
pub use crate::signature::{Cursor, QualifiedName, SignatureDecoder};

/// The tag alphabet
pub use crate::signature::{TagCategory, TypeTag, TYPE_TAG};

// ================================================================================================
// Type Construction
// ================================================================================================

/// The construction capability the decoder is generic over
pub use crate::factory::{ArraySize, TypeFactory};

/// Owned type trees
pub use crate::factory::{SigType, SigTypeFactory};

/// Interning arena with named-type placeholders
pub use crate::factory::{ArenaType, NamedType, TypeArena, TypeId};
