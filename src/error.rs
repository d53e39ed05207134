use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every decode failure is fatal for the signature being decoded. Signatures are produced by the
/// toolchain's own encoder, so a failure points at a toolchain defect or at corrupted module
/// metadata rather than at user input. The variants carry the offending byte position (and
/// character, where one exists) so the embedding compiler can report exactly where a signature
/// went wrong.
///
/// # Error Categories
///
/// ## Grammar Errors
/// - [`Error::UnrecognizedTag`] - Character outside the tag taxonomy
/// - [`Error::UnexpectedCharacter`] - A structural delimiter was expected
/// - [`Error::MalformedQualifiedName`] - Qualified name with an invalid shape
/// - [`Error::InvalidNumber`] - Array size or member count is not a decimal number
///
/// ## Boundary Errors
/// - [`Error::UnexpectedEnd`] - Input ended where a tag or delimiter was required
/// - [`Error::NotCharBoundary`] - A start position falls inside a multi-byte character
/// - [`Error::Unterminated`] - A `;`-terminated field never found its terminator
/// - [`Error::TrailingCharacters`] - A standalone descriptor was not fully consumed
/// - [`Error::Empty`] - Empty descriptor provided
///
/// ## Resource Errors
/// - [`Error::RecursionLimit`] - Nesting exceeded the configured depth
///
/// ## Type Arena Errors
/// - [`Error::TypeNotFound`] - Unknown handle passed to a `TypeArena`
/// - [`Error::TypeError`] - Invalid `TypeArena` operation
///
/// # Examples
///
/// ```rust
/// use typesig::{decode_standalone, Error, SigType};
///
/// match decode_standalone(&SigType::factory(), "I?") {
///     Err(Error::TrailingCharacters { position }) => assert_eq!(position, 1),
///     other => panic!("unexpected result: {:?}", other),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The character at the cursor does not start any known type.
    ///
    /// # Fields
    ///
    /// * `tag` - The offending character
    /// * `position` - Byte offset of the offending character
    #[error("Unrecognized type tag '{tag}' at position {position}")]
    UnrecognizedTag {
        /// The character that was found where a tag was expected
        tag: char,
        /// Byte offset of the character
        position: usize,
    },

    /// The input ended where a tag or a structural delimiter was required.
    #[error("Unexpected end of signature at position {position}")]
    UnexpectedEnd {
        /// Byte offset at which more input was required
        position: usize,
    },

    /// A start position handed to the decoder falls inside a multi-byte character.
    #[error("Position {position} is not on a character boundary")]
    NotCharBoundary {
        /// The offending start position
        position: usize,
    },

    /// A name, size or count field reached the end of the input without its terminator.
    ///
    /// The position is the start of the field, not the end of the buffer.
    #[error("Unterminated field starting at position {position}, expected '{terminator}'")]
    Unterminated {
        /// Byte offset at which the field starts
        position: usize,
        /// The terminator that was never found
        terminator: char,
    },

    /// A qualified name split into more than three parts, or a bare name on a tag that requires
    /// a package-qualified one.
    #[error("Malformed qualified name '{name}' at position {position}")]
    MalformedQualifiedName {
        /// The captured body between the tag and its terminating `;`
        name: String,
        /// Byte offset of the qualified tag
        position: usize,
    },

    /// An array size or a member count is not a non-negative decimal number.
    #[error("Invalid numeric field '{field}' at position {position}")]
    InvalidNumber {
        /// The raw field text
        field: String,
        /// Byte offset at which the field starts
        position: usize,
    },

    /// A structural delimiter was expected but another character was found.
    #[error("Expected '{expected}' but found '{found}' at position {position}")]
    UnexpectedCharacter {
        /// The character that was found
        found: char,
        /// The delimiter that was required
        expected: char,
        /// Byte offset of the offending character
        position: usize,
    },

    /// A standalone descriptor contains characters after its single type.
    #[error("Trailing characters after type at position {position}")]
    TrailingCharacters {
        /// Byte offset of the first unconsumed character
        position: usize,
    },

    /// Provided descriptor was empty.
    #[error("Provided descriptor was empty")]
    Empty,

    /// Failed to find type in `TypeArena`.
    ///
    /// The associated value is the index of the handle that was not found.
    #[error("Failed to find type in TypeArena - #{0}")]
    TypeNotFound(usize),

    /// General error during `TypeArena` usage, such as defining a named type twice.
    #[error("{0}")]
    TypeError(String),

    /// Recursion limit reached.
    ///
    /// The signature nests deeper than [`crate::DecoderConfig::max_depth`]. The associated value
    /// shows the recursion limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}

impl Error {
    /// Byte offset of the failure, if the error is tied to a location in the input.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::UnrecognizedTag { position, .. }
            | Error::UnexpectedEnd { position }
            | Error::NotCharBoundary { position }
            | Error::Unterminated { position, .. }
            | Error::MalformedQualifiedName { position, .. }
            | Error::InvalidNumber { position, .. }
            | Error::UnexpectedCharacter { position, .. }
            | Error::TrailingCharacters { position } => Some(*position),
            Error::Empty
            | Error::RecursionLimit(_)
            | Error::TypeNotFound(_)
            | Error::TypeError(_) => None,
        }
    }

    /// The offending character, for errors that were caused by a specific one.
    #[must_use]
    pub fn character(&self) -> Option<char> {
        match self {
            Error::UnrecognizedTag { tag, .. } => Some(*tag),
            Error::UnexpectedCharacter { found, .. } => Some(*found),
            _ => None,
        }
    }
}
