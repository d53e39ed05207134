// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # typesig
//!
//! A decoder for the compact type signatures that compiled modules carry in their metadata.
//!
//! When a module is compiled, every type it exports (record fields, function parameters, union
//! members and so on) is written out as a short string: one tag character per type, followed by
//! whatever that tag needs, such as a name, an array size or a member count. `typesig` reads those
//! strings back into structured types, so that a compiler importing the module sees the same
//! types the exporting compiler saw.
//!
//! ## Features
//!
//! - **Single pass** - Tag-dispatched recursive descent, no backtracking, no intermediate tokens
//! - **Embedded and standalone** - Decode in the middle of a buffer and get the end cursor back, or
//!   decode a self-contained descriptor that must be consumed completely
//! - **Bring your own types** - Decoded types are built through the [`TypeFactory`] trait
//! - **Bounded** - Nesting depth is capped by [`DecoderConfig::max_depth`]
//! - **Parallel** - Batches of signatures decode on all cores via [`decode_all`]
//!
//! ## Quick Start
//!
//! ```rust
//! use typesig::prelude::*;
//!
//! let factory = SigType::factory();
//!
//! // A function taking an int and returning a map of strings
//! let (ty, end) = decode(&factory, "UI)(MS)", 0)?;
//! assert_eq!(end, 7);
//! assert_eq!(ty.to_string(), "function(int) returns map<string>");
//! # Ok::<(), typesig::Error>(())
//! ```
//!
//! ### Interning Named Types
//!
//! Signatures only ever mention named types by reference. A [`TypeArena`] interns every decoded
//! type and keeps the named ones as placeholders until the importing compiler supplies their
//! definitions:
//!
//! ```rust
//! use typesig::{decode_standalone, TypeArena};
//!
//! let arena = TypeArena::new();
//! let field = decode_standalone(&arena, "[;Cmyorg/people:Person;")?;
//!
//! let pending = arena.undefined();
//! assert_eq!(pending.len(), 1);
//! assert_eq!(pending[0].name, "Person");
//!
//! let definition = decode_standalone(&arena, "P2;SI")?;
//! arena.define(pending[0].id, definition)?;
//! assert!(arena.undefined().is_empty());
//! let rendered = arena.to_sig_type(field).map(|ty| ty.to_string());
//! assert_eq!(rendered.as_deref(), Some("myorg/people:Person[]"));
//! # Ok::<(), typesig::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Decode errors carry the byte position of
//! the failure; see [`Error::position`].
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: `debug` for entry points and
//! failures, `trace` for every decoded tag. Nothing is emitted unless the embedding application
//! installs a logger.

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use typesig::prelude::*;
///
/// let ty = decode_standalone(&SigType::factory(), "O2;SN")?;
/// assert_eq!(ty.to_string(), "(string|())");
/// # Ok::<(), typesig::Error>(())
/// ```
pub mod prelude;

/// Decoder configuration
///
/// Limits and separators that apply to a single decode call. The defaults match the signatures
/// written by the toolchain.
pub mod config;

/// Type construction
///
/// The decoder never builds types itself. Every decoded type is handed to a [`TypeFactory`],
/// which decides the representation.
///
/// # Key Types
///
/// - [`factory::TypeFactory`] - The construction capability the decoder is generic over
/// - [`factory::SigType`] - A plain owned type tree, built by [`factory::SigTypeFactory`]
/// - [`factory::TypeArena`] - A concurrent interner with named-type placeholders
pub mod factory;

/// Signature grammar and decoding
///
/// # Key Types
///
/// - [`signature::SignatureDecoder`] - Recursive decoder over one buffer
/// - [`signature::Cursor`] - Byte cursor with delimiter helpers
/// - [`signature::TypeTag`] - The tag alphabet
/// - [`signature::QualifiedName`] - `package:version:name` splitting
///
/// # Main Functions
///
/// - [`signature::decode`] - Decode one embedded signature
/// - [`signature::decode_standalone`] - Decode one self-contained descriptor
/// - [`signature::decode_sequence`] - Decode all consecutive signatures in a buffer
/// - [`signature::decode_all`] - Decode many descriptors in parallel
pub mod signature;

/// `typesig` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use typesig::{decode_standalone, Result, SigType};
///
/// fn element_count(descriptor: &str) -> Result<usize> {
///     Ok(decode_standalone(&SigType::factory(), descriptor)?.node_count())
/// }
///
/// assert_eq!(element_count("[3;I").unwrap(), 2);
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `typesig` Error type
///
/// The main error type for all operations in this crate. Decode errors carry the byte position
/// of the failure and, where one exists, the offending character.
pub use error::Error;

/// Decoder configuration
pub use config::DecoderConfig;

/// Type construction
pub use factory::{
    ArenaType, ArraySize, NamedType, SigType, SigTypeFactory, TypeArena, TypeFactory, TypeId,
};

/// Signature decoding
pub use signature::{
    decode, decode_all, decode_all_embedded, decode_all_with_config, decode_sequence,
    decode_standalone, decode_standalone_with_config, decode_with_config, Cursor, QualifiedName,
    SignatureDecoder, TagCategory, TypeTag,
};
