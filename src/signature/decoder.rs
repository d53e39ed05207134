use log::trace;

use crate::{
    config::DecoderConfig,
    factory::{ArraySize, TypeFactory},
    signature::{
        cursor::{parse_decimal, Cursor},
        qualified::QualifiedName,
        tags::{TagCategory, TypeTag, TYPE_TAG},
    },
    Error, Result,
};

/// Recursive decoder for type signatures embedded in a larger buffer
///
/// Each call to [`SignatureDecoder::decode_next`] recognizes exactly one type starting at the
/// cursor and leaves the cursor one past the consumed text, so consecutive signatures in the same
/// buffer can be decoded back to back.
///
/// # Example
///
/// ```rust
/// use typesig::{SigType, SignatureDecoder, TypeTag};
///
/// let factory = SigType::factory();
/// let mut decoder = SignatureDecoder::new(&factory, "IMS");
/// assert_eq!(decoder.decode_next()?, SigType::Basic(TypeTag::Int));
/// assert_eq!(decoder.pos(), 1);
///
/// let map = decoder.decode_next()?;
/// assert_eq!(map.to_string(), "map<string>");
/// assert!(!decoder.has_more_data());
/// # Ok::<(), typesig::Error>(())
/// ```
///
/// ## Notes:
/// - The decoder only checks that a signature is syntactically well-formed. Whether the decoded
///   type makes sense is up to the [`TypeFactory`] and the embedding compiler.
/// - After a failed decode the cursor position is unspecified; do not keep decoding from the
///   same instance.
pub struct SignatureDecoder<'a, 'f, F: TypeFactory> {
    cursor: Cursor<'a>,
    factory: &'f F,
    config: DecoderConfig,
    depth: usize,
}

impl<'a, 'f, F: TypeFactory> SignatureDecoder<'a, 'f, F> {
    /// Create a new decoder over `text`, positioned at its start, with default configuration
    #[must_use]
    pub fn new(factory: &'f F, text: &'a str) -> Self {
        SignatureDecoder {
            cursor: Cursor::new(text),
            factory,
            config: DecoderConfig::default(),
            depth: 0,
        }
    }

    /// Create a new decoder over `text`, positioned at `start`
    ///
    /// ## Arguments
    /// * `factory` - Builds the decoded types
    /// * `text` - The buffer holding the signature
    /// * `start` - Byte offset at which the signature starts
    /// * `config` - Limits and separators for this decode
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedEnd`] if `start` lies past the end of `text`, or
    /// [`crate::Error::NotCharBoundary`] if it falls inside a multi-byte character.
    pub fn at(factory: &'f F, text: &'a str, start: usize, config: DecoderConfig) -> Result<Self> {
        Ok(SignatureDecoder {
            cursor: Cursor::at(text, start)?,
            factory,
            config,
            depth: 0,
        })
    }

    /// Continue at a nesting depth that was already reached by the caller
    pub(crate) fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Current cursor position
    #[must_use]
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// Returns `true` if the buffer holds unconsumed input
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.cursor.has_more_data()
    }

    /// Decode one type at the cursor
    ///
    /// # Errors
    /// Returns an error if the signature at the cursor is malformed, truncated, or nests deeper
    /// than [`DecoderConfig::max_depth`].
    pub fn decode_next(&mut self) -> Result<F::Type> {
        self.decode_type()
    }

    /// Decode a single type, tracking the nesting depth
    fn decode_type(&mut self) -> Result<F::Type> {
        if self.depth >= self.config.max_depth {
            return Err(Error::RecursionLimit(self.config.max_depth));
        }

        self.depth += 1;
        let result = self.decode_tagged();
        self.depth -= 1;

        result
    }

    fn decode_tagged(&mut self) -> Result<F::Type> {
        let position = self.cursor.pos();
        let tag = read_tag(&mut self.cursor)?;
        trace!("{} at {} (depth {})", tag.name(), position, self.depth);

        match tag.category() {
            TagCategory::Basic => Ok(self.factory.basic_type(tag)),
            TagCategory::BuiltinReference => {
                let name = self.cursor.read_terminated()?;
                Ok(self.factory.builtin_reference_type(name))
            }
            TagCategory::Qualified => {
                let body = self.cursor.read_terminated()?;
                build_qualified(self.factory, tag, body, position, &self.config)
            }
            TagCategory::Array => {
                let size = read_array_size(&mut self.cursor)?;
                let element = self.decode_type()?;
                Ok(self.factory.array_type(element, size))
            }
            TagCategory::Constrained => {
                let inner = self.decode_type()?;
                Ok(self.factory.constrained_type(tag, Some(inner)))
            }
            TagCategory::Function => self.decode_function(),
            TagCategory::Collection => self.decode_collection(tag),
        }
    }

    /// `<params>)(<return-or-empty>)`, cursor just after the function tag
    fn decode_function(&mut self) -> Result<F::Type> {
        let mut parameters = Vec::new();
        while !self
            .cursor
            .starts_with(&[TYPE_TAG::PARAMS_END, TYPE_TAG::RETURN_START])
        {
            parameters.push(self.decode_type()?);
        }

        self.cursor.advance()?;
        self.cursor.advance()?;

        let return_type = if self.cursor.peek_byte()? == TYPE_TAG::PARAMS_END {
            None
        } else {
            Some(self.decode_type()?)
        };

        self.cursor.expect_byte(TYPE_TAG::PARAMS_END)?;
        Ok(self.factory.function_type(parameters, return_type))
    }

    /// `<count>;<members>`, cursor just after the collection tag
    fn decode_collection(&mut self, tag: TypeTag) -> Result<F::Type> {
        let count = self.cursor.read_decimal()?;

        // every member takes at least one byte
        let remaining = self.cursor.len() - self.cursor.pos();
        let mut members = Vec::with_capacity(count.min(remaining));
        for _ in 0..count {
            members.push(self.decode_type()?);
        }

        Ok(self.factory.collection_type(tag, members))
    }
}

/// Consume the tag byte at the cursor
pub(crate) fn read_tag(cursor: &mut Cursor<'_>) -> Result<TypeTag> {
    let position = cursor.pos();
    let byte = cursor.read_byte()?;
    TypeTag::from_byte(byte).ok_or_else(|| Error::UnrecognizedTag {
        tag: cursor.char_at(position),
        position,
    })
}

/// `<size>;` of an array, an empty size field is an unbounded array
pub(crate) fn read_array_size(cursor: &mut Cursor<'_>) -> Result<ArraySize> {
    let start = cursor.pos();
    let field = cursor.read_terminated()?;
    if field.is_empty() {
        return Ok(ArraySize::Unbounded);
    }

    Ok(ArraySize::Fixed(parse_decimal(field, start)?))
}

/// Build a qualified named type from the body between its tag and `;`
///
/// A bare name is only accepted for tags that have an unconstrained form, and yields that form.
/// Everything else becomes a reference wrapped once more under the qualified tag.
pub(crate) fn build_qualified<F: TypeFactory>(
    factory: &F,
    tag: TypeTag,
    body: &str,
    position: usize,
    config: &DecoderConfig,
) -> Result<F::Type> {
    let qualified = QualifiedName::parse(body, position)?;

    if qualified.is_bare() {
        if !tag.permits_unconstrained() {
            return Err(Error::MalformedQualifiedName {
                name: body.to_string(),
                position,
            });
        }

        return Ok(factory.constrained_type(tag, None));
    }

    let package_path = qualified.effective_package_path(config.version_separator);
    let reference = factory.reference_type(tag, &package_path, qualified.name);
    Ok(factory.constrained_type(tag, Some(reference)))
}
