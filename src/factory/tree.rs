//! Owned type trees built by [`SigTypeFactory`].
//!
//! [`SigType`] mirrors the decoder's factory calls one to one, which makes it the natural
//! representation for tests, tooling and diagnostics. Named types are kept as references and
//! never expanded.

use std::fmt;

use crate::{
    factory::{ArraySize, TypeFactory},
    signature::{TagCategory, TypeTag},
};

/// A decoded type as a plain owned tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SigType {
    /// Scalar type
    Basic(TypeTag),
    /// Built-in named type
    Builtin(String),
    /// User-defined named type
    Reference {
        /// The qualified tag the reference was found under
        tag: TypeTag,
        /// Effective package path, version included
        package_path: String,
        /// Type name within the package
        name: String,
    },
    /// Type over one optional inner type, also used for qualified named types
    Constrained(TypeTag, Option<Box<SigType>>),
    /// Array of an element type
    Array(Box<SigType>, ArraySize),
    /// Function type
    Function {
        /// Parameter types in declaration order
        parameters: Vec<SigType>,
        /// Return type, `None` if absent
        return_type: Option<Box<SigType>>,
    },
    /// Union or tuple
    Collection(TypeTag, Vec<SigType>),
}

impl SigType {
    /// The factory producing [`SigType`] values.
    #[must_use]
    pub fn factory() -> SigTypeFactory {
        SigTypeFactory
    }

    /// Shorthand for a named type under a qualified tag, as the decoder builds it.
    #[must_use]
    pub fn named(tag: TypeTag, package_path: &str, name: &str) -> SigType {
        SigType::Constrained(
            tag,
            Some(Box::new(SigType::Reference {
                tag,
                package_path: package_path.to_string(),
                name: name.to_string(),
            })),
        )
    }

    /// Number of nodes in this tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + match self {
            SigType::Basic(_) | SigType::Builtin(_) | SigType::Reference { .. } => 0,
            SigType::Constrained(_, inner) => inner.as_ref().map_or(0, |inner| inner.node_count()),
            SigType::Array(element, _) => element.node_count(),
            SigType::Function {
                parameters,
                return_type,
            } => {
                parameters.iter().map(SigType::node_count).sum::<usize>()
                    + return_type.as_ref().map_or(0, |ret| ret.node_count())
            }
            SigType::Collection(_, members) => members.iter().map(SigType::node_count).sum(),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[SigType], separator: &str) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for SigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigType::Basic(tag) => f.write_str(tag.name()),
            SigType::Builtin(name) => f.write_str(name),
            SigType::Reference {
                package_path, name, ..
            } => {
                if package_path.is_empty() {
                    f.write_str(name)
                } else {
                    write!(f, "{package_path}:{name}")
                }
            }
            SigType::Constrained(tag, None) => f.write_str(tag.name()),
            SigType::Constrained(tag, Some(inner)) => {
                if tag.category() == TagCategory::Qualified {
                    write!(f, "{inner}")
                } else {
                    write!(f, "{}<{inner}>", tag.name())
                }
            }
            SigType::Array(element, size) => write!(f, "{element}[{size}]"),
            SigType::Function {
                parameters,
                return_type,
            } => {
                f.write_str("function(")?;
                write_list(f, parameters, ", ")?;
                f.write_str(")")?;
                if let Some(ret) = return_type {
                    write!(f, " returns {ret}")?;
                }
                Ok(())
            }
            SigType::Collection(TypeTag::Tuple, members) => {
                f.write_str("[")?;
                write_list(f, members, ", ")?;
                f.write_str("]")
            }
            SigType::Collection(_, members) => {
                f.write_str("(")?;
                write_list(f, members, "|")?;
                f.write_str(")")
            }
        }
    }
}

/// [`TypeFactory`] building [`SigType`] trees
#[derive(Debug, Clone, Copy, Default)]
pub struct SigTypeFactory;

impl TypeFactory for SigTypeFactory {
    type Type = SigType;

    fn basic_type(&self, tag: TypeTag) -> SigType {
        SigType::Basic(tag)
    }

    fn builtin_reference_type(&self, name: &str) -> SigType {
        SigType::Builtin(name.to_string())
    }

    fn reference_type(&self, tag: TypeTag, package_path: &str, name: &str) -> SigType {
        SigType::Reference {
            tag,
            package_path: package_path.to_string(),
            name: name.to_string(),
        }
    }

    fn constrained_type(&self, tag: TypeTag, constraint: Option<SigType>) -> SigType {
        SigType::Constrained(tag, constraint.map(Box::new))
    }

    fn array_type(&self, element: SigType, size: ArraySize) -> SigType {
        SigType::Array(Box::new(element), size)
    }

    fn function_type(&self, parameters: Vec<SigType>, return_type: Option<SigType>) -> SigType {
        SigType::Function {
            parameters,
            return_type: return_type.map(Box::new),
        }
    }

    fn collection_type(&self, tag: TypeTag, members: Vec<SigType>) -> SigType {
        SigType::Collection(tag, members)
    }
}
