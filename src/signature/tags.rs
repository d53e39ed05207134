//! The fixed tag taxonomy of the signature grammar.
//!
//! Every (sub-)signature starts with a single ASCII tag character that selects one of seven
//! structural categories. The raw byte values live in [`TYPE_TAG`]; [`TypeTag`] is the typed
//! view the decoder and the [`crate::TypeFactory`] work with.

use std::fmt;

use strum::{EnumCount, EnumIter};

#[allow(non_snake_case, dead_code, missing_docs)]
/// Bytes that start a type inside a signature
pub mod TYPE_TAG {
    // Basic types, no trailing data
    pub const INT: u8 = b'I';
    pub const BYTE: u8 = b'W';
    pub const FLOAT: u8 = b'F';
    pub const DECIMAL: u8 = b'L';
    pub const STRING: u8 = b'S';
    pub const BOOLEAN: u8 = b'B';
    pub const HANDLE: u8 = b'Y';
    pub const ANY: u8 = b'A';
    pub const NIL: u8 = b'N';
    pub const ANYDATA: u8 = b'K';
    pub const JSON: u8 = b'J';
    // Followed by name;
    pub const BUILTIN: u8 = b'R';
    // Followed by [path:[version:]]name;
    pub const RECORD: u8 = b'C';
    pub const OBJECT: u8 = b'X';
    pub const FINITE: u8 = b'Z';
    pub const ERROR: u8 = b'E';
    pub const TABLE: u8 = b'T';
    pub const STREAM: u8 = b'H';
    // Followed by size; element
    pub const ARRAY: u8 = b'[';
    // Followed by one type
    pub const MAP: u8 = b'M';
    pub const FUTURE: u8 = b'Q';
    pub const TYPEDESC: u8 = b'G';
    // Followed by params )( return )
    pub const FUNCTION: u8 = b'U';
    // Followed by count; members
    pub const UNION: u8 = b'O';
    pub const TUPLE: u8 = b'P';

    // Structural delimiters
    pub const TERMINATOR: u8 = b';';
    pub const NAME_SEPARATOR: u8 = b':';
    pub const PARAMS_END: u8 = b')';
    pub const RETURN_START: u8 = b'(';
}

/// Structural category selected by a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    /// Scalar type, the tag alone identifies it
    Basic,
    /// Reference to a built-in named type, `R<name>;`
    BuiltinReference,
    /// Reference to a user-defined named type, `<tag><path:version:name>;`
    Qualified,
    /// `[<size>;<element>`
    Array,
    /// Composite over exactly one inner type, `<tag><inner>`
    Constrained,
    /// `U<params>)(<return>)`
    Function,
    /// Multi-member composite, `<tag><count>;<members>`
    Collection,
}

/// A type tag of the signature grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum TypeTag {
    /// int
    Int,
    /// byte
    Byte,
    /// float
    Float,
    /// decimal
    Decimal,
    /// string
    String,
    /// boolean
    Boolean,
    /// handle
    Handle,
    /// any
    Any,
    /// nil
    Nil,
    /// anydata
    Anydata,
    /// json
    Json,
    /// Built-in named type
    Builtin,
    /// record
    Record,
    /// object
    Object,
    /// finite type
    Finite,
    /// error
    Error,
    /// table
    Table,
    /// stream
    Stream,
    /// array
    Array,
    /// map
    Map,
    /// future
    Future,
    /// typedesc
    Typedesc,
    /// function
    Function,
    /// union
    Union,
    /// tuple
    Tuple,
}

impl TypeTag {
    /// Maps a signature byte to its tag, `None` for bytes outside the taxonomy.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<TypeTag> {
        let tag = match byte {
            TYPE_TAG::INT => TypeTag::Int,
            TYPE_TAG::BYTE => TypeTag::Byte,
            TYPE_TAG::FLOAT => TypeTag::Float,
            TYPE_TAG::DECIMAL => TypeTag::Decimal,
            TYPE_TAG::STRING => TypeTag::String,
            TYPE_TAG::BOOLEAN => TypeTag::Boolean,
            TYPE_TAG::HANDLE => TypeTag::Handle,
            TYPE_TAG::ANY => TypeTag::Any,
            TYPE_TAG::NIL => TypeTag::Nil,
            TYPE_TAG::ANYDATA => TypeTag::Anydata,
            TYPE_TAG::JSON => TypeTag::Json,
            TYPE_TAG::BUILTIN => TypeTag::Builtin,
            TYPE_TAG::RECORD => TypeTag::Record,
            TYPE_TAG::OBJECT => TypeTag::Object,
            TYPE_TAG::FINITE => TypeTag::Finite,
            TYPE_TAG::ERROR => TypeTag::Error,
            TYPE_TAG::TABLE => TypeTag::Table,
            TYPE_TAG::STREAM => TypeTag::Stream,
            TYPE_TAG::ARRAY => TypeTag::Array,
            TYPE_TAG::MAP => TypeTag::Map,
            TYPE_TAG::FUTURE => TypeTag::Future,
            TYPE_TAG::TYPEDESC => TypeTag::Typedesc,
            TYPE_TAG::FUNCTION => TypeTag::Function,
            TYPE_TAG::UNION => TypeTag::Union,
            TYPE_TAG::TUPLE => TypeTag::Tuple,
            _ => return None,
        };

        Some(tag)
    }

    /// The byte this tag is encoded as.
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            TypeTag::Int => TYPE_TAG::INT,
            TypeTag::Byte => TYPE_TAG::BYTE,
            TypeTag::Float => TYPE_TAG::FLOAT,
            TypeTag::Decimal => TYPE_TAG::DECIMAL,
            TypeTag::String => TYPE_TAG::STRING,
            TypeTag::Boolean => TYPE_TAG::BOOLEAN,
            TypeTag::Handle => TYPE_TAG::HANDLE,
            TypeTag::Any => TYPE_TAG::ANY,
            TypeTag::Nil => TYPE_TAG::NIL,
            TypeTag::Anydata => TYPE_TAG::ANYDATA,
            TypeTag::Json => TYPE_TAG::JSON,
            TypeTag::Builtin => TYPE_TAG::BUILTIN,
            TypeTag::Record => TYPE_TAG::RECORD,
            TypeTag::Object => TYPE_TAG::OBJECT,
            TypeTag::Finite => TYPE_TAG::FINITE,
            TypeTag::Error => TYPE_TAG::ERROR,
            TypeTag::Table => TYPE_TAG::TABLE,
            TypeTag::Stream => TYPE_TAG::STREAM,
            TypeTag::Array => TYPE_TAG::ARRAY,
            TypeTag::Map => TYPE_TAG::MAP,
            TypeTag::Future => TYPE_TAG::FUTURE,
            TypeTag::Typedesc => TYPE_TAG::TYPEDESC,
            TypeTag::Function => TYPE_TAG::FUNCTION,
            TypeTag::Union => TYPE_TAG::UNION,
            TypeTag::Tuple => TYPE_TAG::TUPLE,
        }
    }

    /// The character this tag is encoded as.
    #[must_use]
    pub fn as_char(self) -> char {
        char::from(self.as_byte())
    }

    /// Human-readable name of the type this tag introduces.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Byte => "byte",
            TypeTag::Float => "float",
            TypeTag::Decimal => "decimal",
            TypeTag::String => "string",
            TypeTag::Boolean => "boolean",
            TypeTag::Handle => "handle",
            TypeTag::Any => "any",
            TypeTag::Nil => "()",
            TypeTag::Anydata => "anydata",
            TypeTag::Json => "json",
            TypeTag::Builtin => "builtin",
            TypeTag::Record => "record",
            TypeTag::Object => "object",
            TypeTag::Finite => "finite",
            TypeTag::Error => "error",
            TypeTag::Table => "table",
            TypeTag::Stream => "stream",
            TypeTag::Array => "array",
            TypeTag::Map => "map",
            TypeTag::Future => "future",
            TypeTag::Typedesc => "typedesc",
            TypeTag::Function => "function",
            TypeTag::Union => "union",
            TypeTag::Tuple => "tuple",
        }
    }

    /// The structural category of this tag.
    #[must_use]
    pub fn category(self) -> TagCategory {
        match self {
            TypeTag::Int
            | TypeTag::Byte
            | TypeTag::Float
            | TypeTag::Decimal
            | TypeTag::String
            | TypeTag::Boolean
            | TypeTag::Handle
            | TypeTag::Any
            | TypeTag::Nil
            | TypeTag::Anydata
            | TypeTag::Json => TagCategory::Basic,
            TypeTag::Builtin => TagCategory::BuiltinReference,
            TypeTag::Record
            | TypeTag::Object
            | TypeTag::Finite
            | TypeTag::Error
            | TypeTag::Table
            | TypeTag::Stream => TagCategory::Qualified,
            TypeTag::Array => TagCategory::Array,
            TypeTag::Map | TypeTag::Future | TypeTag::Typedesc => TagCategory::Constrained,
            TypeTag::Function => TagCategory::Function,
            TypeTag::Union | TypeTag::Tuple => TagCategory::Collection,
        }
    }

    /// Returns `true` for qualified tags that may appear without a name (`E;`, `T;`, `H;`),
    /// which decode to an unconstrained type.
    #[must_use]
    pub fn permits_unconstrained(self) -> bool {
        matches!(self, TypeTag::Error | TypeTag::Table | TypeTag::Stream)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
