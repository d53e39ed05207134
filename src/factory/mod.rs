//! The type factory boundary between the decoder and a concrete type representation.
//!
//! The decoder never builds a type on its own. Every structural piece it recognizes is handed to
//! a [`TypeFactory`], which decides what a "type" is for the caller: a lightweight tree for type
//! checking, an interned handle into a registry, a runtime reflection object, and so on.
//!
//! Two factories ship with the crate:
//!
//! - [`SigType`] - a plain owned tree, convenient for tests and tooling
//! - [`TypeArena`] - a thread-safe interning arena with stub-first / backfill-later resolution
//!   of named types, for embedding compilers whose named types may still be under construction
//!   when a signature refers to them
//!
//! # Examples
//!
//! ```rust
//! use typesig::{decode, ArraySize, SigType, TypeTag};
//!
//! let (ty, end) = decode(&SigType::factory(), "[3;I", 0)?;
//! assert_eq!(end, 4);
//! assert_eq!(
//!     ty,
//!     SigType::Array(Box::new(SigType::Basic(TypeTag::Int)), ArraySize::Fixed(3))
//! );
//! # Ok::<(), typesig::Error>(())
//! ```

mod arena;
mod tree;

pub use arena::{ArenaType, NamedType, TypeArena, TypeId};
pub use tree::{SigType, SigTypeFactory};

use std::fmt;

use crate::signature::TypeTag;

/// Size of an array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArraySize {
    /// Sealed array with a fixed number of elements
    Fixed(usize),
    /// Open array without a declared size
    Unbounded,
}

impl fmt::Display for ArraySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArraySize::Fixed(size) => write!(f, "{size}"),
            ArraySize::Unbounded => Ok(()),
        }
    }
}

/// Builds concrete types out of decoded signature structure.
///
/// Implementations are supplied by the embedding compiler and may differ per use site. The
/// decoder calls exactly one factory method per recognized (sub-)type, innermost first, and
/// makes no assumption about identity or canonicalization of the returned values, so
/// implementations are free to memoize or intern.
///
/// All methods take `&self`: a factory shared between threads (see [`crate::decode_all`])
/// must use interior mutability for any state it keeps.
///
/// The decoder guarantees that the `tag` arguments belong to the category each method is named
/// after, and that `constrained_type` only receives `None` for tags where
/// [`TypeTag::permits_unconstrained`] holds.
pub trait TypeFactory {
    /// The concrete type representation produced by this factory.
    type Type;

    /// Build a scalar type from one of the basic tags.
    fn basic_type(&self, tag: TypeTag) -> Self::Type;

    /// Build a reference to a built-in (non user-defined) type by name.
    fn builtin_reference_type(&self, name: &str) -> Self::Type;

    /// Build a reference to a user-defined named type.
    ///
    /// ## Arguments
    /// * `tag` - The qualified tag the reference was found under (record, object, ...)
    /// * `package_path` - The effective package path, including the version when present
    /// * `name` - The type name within the package
    fn reference_type(&self, tag: TypeTag, package_path: &str, name: &str) -> Self::Type;

    /// Build a type parameterized by exactly one inner type.
    ///
    /// Qualified named types arrive here as well, wrapping the result of
    /// [`TypeFactory::reference_type`] under their qualified tag.
    fn constrained_type(&self, tag: TypeTag, constraint: Option<Self::Type>) -> Self::Type;

    /// Build an array type.
    fn array_type(&self, element: Self::Type, size: ArraySize) -> Self::Type;

    /// Build a function type. An absent return type is `None`.
    fn function_type(&self, parameters: Vec<Self::Type>, return_type: Option<Self::Type>)
        -> Self::Type;

    /// Build a multi-member composite (union, tuple) preserving member order.
    fn collection_type(&self, tag: TypeTag, members: Vec<Self::Type>) -> Self::Type;
}
