//! Interning type arena with two-phase resolution of named types.
//!
//! A module's own type definitions may refer to each other in any order, including cyclically.
//! [`TypeArena`] therefore never owns named types recursively: a reference to a user-defined
//! type is a stub node keyed by its package path and name, and the body of that type is
//! backfilled later with [`TypeArena::define`]. Decoding a signature that mentions a type which
//! is still under construction simply yields the stub.
//!
//! # Thread Safety
//!
//! All operations take `&self`. Storage is an append-only [`boxcar::Vec`], while the structural
//! intern index, the name index and the definitions are [`dashmap::DashMap`]s. One arena can
//! back any number of concurrent decodes (see [`crate::decode_all`]).
//!
//! # Examples
//!
//! ```rust
//! use typesig::{decode_standalone, TypeArena, TypeTag};
//!
//! let arena = TypeArena::new();
//!
//! // `Node` refers to itself before it is defined
//! let node = arena.declare(TypeTag::Record, "myorg/graph", "Node");
//! let body = decode_standalone(&arena, "O2;Cmyorg/graph:Node;N")?;
//! assert!(arena.resolve(node).is_none());
//!
//! arena.define(node, body)?;
//! assert_eq!(arena.resolve(node), Some(body));
//! assert!(arena.undefined().is_empty());
//! # Ok::<(), typesig::Error>(())
//! ```

use std::fmt;

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    factory::{ArraySize, SigType, TypeFactory},
    signature::TypeTag,
    Error, Result,
};

/// Handle of a type stored in a [`TypeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    /// Position of this type within its arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node stored in a [`TypeArena`]. Children are referenced by [`TypeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArenaType {
    /// Scalar type
    Basic(TypeTag),
    /// Built-in named type
    Builtin(String),
    /// Stub for a user-defined named type, see [`TypeArena::define`]
    Reference {
        /// Qualified tag of the named type
        tag: TypeTag,
        /// Effective package path
        package_path: String,
        /// Type name
        name: String,
    },
    /// Type over one optional inner type
    Constrained(TypeTag, Option<TypeId>),
    /// Array of an element type
    Array(TypeId, ArraySize),
    /// Function type
    Function(Vec<TypeId>, Option<TypeId>),
    /// Union or tuple
    Collection(TypeTag, Vec<TypeId>),
}

/// View of a named type and its resolution state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    /// The stub node of the named type
    pub id: TypeId,
    /// Qualified tag of the named type
    pub tag: TypeTag,
    /// Effective package path
    pub package_path: String,
    /// Type name
    pub name: String,
    /// The backfilled body, `None` while the type is still under construction
    pub definition: Option<TypeId>,
}

/// A thread-safe, interning [`TypeFactory`].
///
/// Structurally identical types share one [`TypeId`], so decoding the same signature twice
/// returns the same handle.
#[derive(Default)]
pub struct TypeArena {
    /// All nodes, indexed by `TypeId`
    types: boxcar::Vec<ArenaType>,
    /// Structural index for interning
    interned: DashMap<ArenaType, TypeId>,
    /// Backfilled bodies of named types, keyed by their stub
    definitions: DashMap<TypeId, TypeId>,
    /// Stubs of named types, keyed by `(package_path, name)`
    names: DashMap<(String, String), TypeId>,
}

impl TypeArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct types stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.count()
    }

    /// Returns `true` if no type has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a stored node.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&ArenaType> {
        self.types.get(id.0)
    }

    fn intern(&self, ty: ArenaType) -> TypeId {
        if let Some(id) = self.interned.get(&ty) {
            return *id;
        }

        *self
            .interned
            .entry(ty.clone())
            .or_insert_with(|| TypeId(self.types.push(ty)))
    }

    /// Declare a named type ahead of its definition, returning its stub.
    ///
    /// A package path and name identify exactly one named type. Declaring it again, or decoding
    /// a reference to it, returns the same stub under any qualified tag; the stub keeps the tag
    /// it was first seen under.
    pub fn declare(&self, tag: TypeTag, package_path: &str, name: &str) -> TypeId {
        let key = (package_path.to_string(), name.to_string());
        if let Some(id) = self.names.get(&key) {
            return *id;
        }

        *self.names.entry(key).or_insert_with(|| {
            self.intern(ArenaType::Reference {
                tag,
                package_path: package_path.to_string(),
                name: name.to_string(),
            })
        })
    }

    /// Backfill the body of a declared named type.
    ///
    /// ## Arguments
    /// * `named` - The stub returned by [`TypeArena::declare`] or produced by a decode
    /// * `body` - The type the name stands for
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if either handle is unknown, or
    /// [`crate::Error::TypeError`] if `named` is not a named type or was already defined.
    pub fn define(&self, named: TypeId, body: TypeId) -> Result<()> {
        match self.get(named) {
            Some(ArenaType::Reference { .. }) => {}
            Some(_) => {
                return Err(Error::TypeError(format!(
                    "{named} is not a named type and can not be defined"
                )))
            }
            None => return Err(Error::TypeNotFound(named.0)),
        }

        if self.get(body).is_none() {
            return Err(Error::TypeNotFound(body.0));
        }

        match self.definitions.entry(named) {
            Entry::Occupied(_) => Err(Error::TypeError(format!(
                "{named} has already been defined"
            ))),
            Entry::Vacant(entry) => {
                entry.insert(body);
                Ok(())
            }
        }
    }

    /// The body backfilled for a named type, `None` while it is undefined or if `named` is not
    /// a named type.
    #[must_use]
    pub fn resolve(&self, named: TypeId) -> Option<TypeId> {
        self.definitions.get(&named).map(|body| *body)
    }

    /// Look up a named type by package path and name.
    #[must_use]
    pub fn lookup(&self, package_path: &str, name: &str) -> Option<NamedType> {
        let id = *self
            .names
            .get(&(package_path.to_string(), name.to_string()))?;
        self.named_type(id)
    }

    /// The named type behind a stub, `None` if `id` is not a named type.
    #[must_use]
    pub fn named_type(&self, id: TypeId) -> Option<NamedType> {
        match self.get(id)? {
            ArenaType::Reference {
                tag,
                package_path,
                name,
            } => Some(NamedType {
                id,
                tag: *tag,
                package_path: package_path.clone(),
                name: name.clone(),
                definition: self.resolve(id),
            }),
            _ => None,
        }
    }

    /// All named types stored in this arena, in insertion order.
    #[must_use]
    pub fn named_types(&self) -> Vec<NamedType> {
        self.types
            .iter()
            .filter_map(|(index, _)| self.named_type(TypeId(index)))
            .collect()
    }

    /// Named types that are referenced or declared but not yet defined.
    #[must_use]
    pub fn undefined(&self) -> Vec<NamedType> {
        self.named_types()
            .into_iter()
            .filter(|named| named.definition.is_none())
            .collect()
    }

    /// Rebuild a stored type as an owned [`SigType`] tree.
    ///
    /// Named types are rendered as their reference and are not expanded, so cyclic definitions
    /// convert fine.
    #[must_use]
    pub fn to_sig_type(&self, id: TypeId) -> Option<SigType> {
        let converted = match self.get(id)? {
            ArenaType::Basic(tag) => SigType::Basic(*tag),
            ArenaType::Builtin(name) => SigType::Builtin(name.clone()),
            ArenaType::Reference {
                tag,
                package_path,
                name,
            } => SigType::Reference {
                tag: *tag,
                package_path: package_path.clone(),
                name: name.clone(),
            },
            ArenaType::Constrained(tag, inner) => SigType::Constrained(
                *tag,
                match inner {
                    Some(inner) => Some(Box::new(self.to_sig_type(*inner)?)),
                    None => None,
                },
            ),
            ArenaType::Array(element, size) => {
                SigType::Array(Box::new(self.to_sig_type(*element)?), *size)
            }
            ArenaType::Function(parameters, return_type) => SigType::Function {
                parameters: parameters
                    .iter()
                    .map(|param| self.to_sig_type(*param))
                    .collect::<Option<Vec<_>>>()?,
                return_type: match return_type {
                    Some(ret) => Some(Box::new(self.to_sig_type(*ret)?)),
                    None => None,
                },
            },
            ArenaType::Collection(tag, members) => SigType::Collection(
                *tag,
                members
                    .iter()
                    .map(|member| self.to_sig_type(*member))
                    .collect::<Option<Vec<_>>>()?,
            ),
        };

        Some(converted)
    }
}

impl TypeFactory for TypeArena {
    type Type = TypeId;

    fn basic_type(&self, tag: TypeTag) -> TypeId {
        self.intern(ArenaType::Basic(tag))
    }

    fn builtin_reference_type(&self, name: &str) -> TypeId {
        self.intern(ArenaType::Builtin(name.to_string()))
    }

    fn reference_type(&self, tag: TypeTag, package_path: &str, name: &str) -> TypeId {
        self.declare(tag, package_path, name)
    }

    fn constrained_type(&self, tag: TypeTag, constraint: Option<TypeId>) -> TypeId {
        self.intern(ArenaType::Constrained(tag, constraint))
    }

    fn array_type(&self, element: TypeId, size: ArraySize) -> TypeId {
        self.intern(ArenaType::Array(element, size))
    }

    fn function_type(&self, parameters: Vec<TypeId>, return_type: Option<TypeId>) -> TypeId {
        self.intern(ArenaType::Function(parameters, return_type))
    }

    fn collection_type(&self, tag: TypeTag, members: Vec<TypeId>) -> TypeId {
        self.intern(ArenaType::Collection(tag, members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning() {
        let arena = TypeArena::new();
        let a = arena.basic_type(TypeTag::Int);
        let b = arena.basic_type(TypeTag::Int);
        let c = arena.basic_type(TypeTag::String);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(arena.len(), 2);

        let list1 = arena.array_type(a, ArraySize::Unbounded);
        let list2 = arena.array_type(b, ArraySize::Unbounded);
        let sized = arena.array_type(a, ArraySize::Fixed(2));
        assert_eq!(list1, list2);
        assert_ne!(list1, sized);
        assert_eq!(arena.get(list1), Some(&ArenaType::Array(a, ArraySize::Unbounded)));
    }

    #[test]
    fn test_declare_then_define() {
        let arena = TypeArena::new();
        let person = arena.declare(TypeTag::Record, "myorg/people", "Person");
        assert_eq!(
            arena.reference_type(TypeTag::Record, "myorg/people", "Person"),
            person
        );
        assert_eq!(arena.undefined().len(), 1);

        let string = arena.basic_type(TypeTag::String);
        let body = arena.collection_type(TypeTag::Tuple, vec![string, person]);
        arena.define(person, body).unwrap();

        assert_eq!(arena.resolve(person), Some(body));
        assert!(arena.undefined().is_empty());

        let named = arena.lookup("myorg/people", "Person").unwrap();
        assert_eq!(named.id, person);
        assert_eq!(named.tag, TypeTag::Record);
        assert_eq!(named.definition, Some(body));
        assert!(arena.lookup("myorg/people", "Other").is_none());
    }

    #[test]
    fn test_name_identifies_one_type_across_tags() {
        let arena = TypeArena::new();
        let shape = arena.declare(TypeTag::Record, "myorg/geo", "Shape");

        assert_eq!(arena.declare(TypeTag::Object, "myorg/geo", "Shape"), shape);
        assert_eq!(
            arena.reference_type(TypeTag::Finite, "myorg/geo", "Shape"),
            shape
        );
        assert_eq!(arena.named_types().len(), 1);

        let named = arena.lookup("myorg/geo", "Shape").unwrap();
        assert_eq!(named.id, shape);
        assert_eq!(named.tag, TypeTag::Record);

        // the wrappers stay distinct, only the stub is shared
        let as_record = arena.constrained_type(TypeTag::Record, Some(shape));
        let as_object = arena.constrained_type(TypeTag::Object, Some(shape));
        assert_ne!(as_record, as_object);
    }

    #[test]
    fn test_lookup_misses() {
        let arena = TypeArena::new();
        let int = arena.basic_type(TypeTag::Int);
        arena.declare(TypeTag::Record, "myorg/geo", "Point");

        assert!(arena.lookup("myorg/geo", "point").is_none());
        assert!(arena.lookup("myorg/other", "Point").is_none());
        assert_eq!(arena.named_type(int), None);
        assert_eq!(arena.named_type(TypeId(77)), None);
    }

    #[test]
    fn test_define_errors() {
        let arena = TypeArena::new();
        let int = arena.basic_type(TypeTag::Int);
        let named = arena.declare(TypeTag::Object, "p", "Obj");

        assert!(matches!(arena.define(int, int), Err(Error::TypeError(_))));
        assert_eq!(
            arena.define(named, TypeId(99)),
            Err(Error::TypeNotFound(99))
        );
        assert_eq!(arena.define(TypeId(42), int), Err(Error::TypeNotFound(42)));

        arena.define(named, int).unwrap();
        assert!(matches!(arena.define(named, int), Err(Error::TypeError(_))));
        assert_eq!(arena.resolve(named), Some(int));
    }

    #[test]
    fn test_to_sig_type_on_cycle() {
        let arena = TypeArena::new();
        let node = arena.declare(TypeTag::Record, "g", "Node");
        let wrapped = arena.constrained_type(TypeTag::Record, Some(node));
        let nil = arena.basic_type(TypeTag::Nil);
        let body = arena.collection_type(TypeTag::Union, vec![wrapped, nil]);
        arena.define(node, body).unwrap();

        assert_eq!(
            arena.to_sig_type(body),
            Some(SigType::Collection(
                TypeTag::Union,
                vec![
                    SigType::named(TypeTag::Record, "g", "Node"),
                    SigType::Basic(TypeTag::Nil)
                ]
            ))
        );
        assert_eq!(arena.to_sig_type(TypeId(1000)), None);
    }

    #[test]
    fn test_concurrent_interning() {
        use rayon::prelude::*;

        let arena = TypeArena::new();
        let ids: Vec<TypeId> = (0..256)
            .into_par_iter()
            .map(|_| {
                let int = arena.basic_type(TypeTag::Int);
                arena.array_type(int, ArraySize::Fixed(4))
            })
            .collect();

        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(arena.len(), 2);

        let stubs: Vec<TypeId> = (0..256)
            .into_par_iter()
            .map(|i| {
                let tag = if i % 2 == 0 { TypeTag::Record } else { TypeTag::Object };
                arena.declare(tag, "myorg/geo", "Point")
            })
            .collect();
        assert!(stubs.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(arena.named_types().len(), 1);
    }
}
