//! Bounds-checked cursor over a signature buffer.
//!
//! [`Cursor`] is the only way the decoders touch their input. Every read validates the current
//! position first, so a truncated or corrupted signature turns into a structured
//! [`crate::Error`] instead of an out-of-bounds access.

use crate::{signature::tags::TYPE_TAG, Error, Result};

/// A cursor over one signature buffer.
///
/// The buffer is borrowed immutably for the lifetime of the cursor and the position only ever
/// moves forward. Sibling decodes within one signature share a cursor; unrelated decodes never
/// do.
///
/// # Examples
///
/// ```rust
/// use typesig::Cursor;
///
/// let mut cursor = Cursor::new("[12;I");
/// assert_eq!(cursor.read_byte()?, b'[');
/// assert_eq!(cursor.read_terminated()?, "12");
/// assert_eq!(cursor.pos(), 4);
/// # Ok::<(), typesig::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// The signature text being decoded
    text: &'a str,
    /// Current byte position within `text`
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new [`Cursor`] positioned at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Cursor { text, position: 0 }
    }

    /// Create a new [`Cursor`] positioned at `position`.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedEnd`] if `position` is past the end of `text`, or
    /// [`crate::Error::NotCharBoundary`] if it falls inside a multi-byte character.
    pub fn at(text: &'a str, position: usize) -> Result<Self> {
        if position > text.len() {
            return Err(Error::UnexpectedEnd { position });
        }

        if !text.is_char_boundary(position) {
            return Err(Error::NotCharBoundary { position });
        }

        Ok(Cursor { text, position })
    }

    /// Returns the length of the underlying buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns `true` if there is unconsumed input left.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.text.len()
    }

    /// Current byte position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// The full underlying buffer.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Look at the byte under the cursor without consuming it.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedEnd`] if the cursor is at the end of the buffer.
    pub fn peek_byte(&self) -> Result<u8> {
        self.text
            .as_bytes()
            .get(self.position)
            .copied()
            .ok_or(Error::UnexpectedEnd {
                position: self.position,
            })
    }

    /// Returns `true` if the unconsumed input starts with `pattern`.
    #[must_use]
    pub fn starts_with(&self, pattern: &[u8]) -> bool {
        self.text.as_bytes()[self.position..].starts_with(pattern)
    }

    /// Consume and return the byte under the cursor.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedEnd`] if the cursor is at the end of the buffer.
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.position += 1;
        Ok(byte)
    }

    /// Move the cursor forward by one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedEnd`] if the cursor is at the end of the buffer.
    pub fn advance(&mut self) -> Result<()> {
        self.read_byte().map(|_| ())
    }

    /// Consume `expected`, failing if a different byte is under the cursor.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedEnd`] at the end of the buffer, or
    /// [`crate::Error::UnexpectedCharacter`] if another character is found.
    pub fn expect_byte(&mut self, expected: u8) -> Result<()> {
        let position = self.position;
        let found = self.peek_byte()?;
        if found != expected {
            return Err(Error::UnexpectedCharacter {
                found: self.char_at(position),
                expected: char::from(expected),
                position,
            });
        }

        self.position += 1;
        Ok(())
    }

    /// Read everything up to the next `;`, consuming the terminator but not returning it.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unterminated`] if the buffer ends before a `;` is found.
    pub fn read_terminated(&mut self) -> Result<&'a str> {
        let start = self.position;
        let offset = self.text.as_bytes()[start..]
            .iter()
            .position(|&byte| byte == TYPE_TAG::TERMINATOR)
            .ok_or(Error::Unterminated {
                position: start,
                terminator: char::from(TYPE_TAG::TERMINATOR),
            })?;

        let end = start + offset;
        let field = self.text.get(start..end).ok_or(Error::Unterminated {
            position: start,
            terminator: char::from(TYPE_TAG::TERMINATOR),
        })?;
        self.position = end + 1;
        Ok(field)
    }

    /// Read a `;`-terminated non-negative decimal number.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unterminated`] if the terminator is missing, or
    /// [`crate::Error::InvalidNumber`] if the field is not a plain decimal number.
    pub fn read_decimal(&mut self) -> Result<usize> {
        let start = self.position;
        let field = self.read_terminated()?;
        parse_decimal(field, start)
    }

    /// The character starting at `position`, `'\0'` when out of range.
    #[must_use]
    pub fn char_at(&self, position: usize) -> char {
        self.text
            .get(position..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0')
    }
}

/// Parse a decimal field, rejecting signs, whitespace and empty input.
pub(crate) fn parse_decimal(field: &str, position: usize) -> Result<usize> {
    if field.is_empty() || !field.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(Error::InvalidNumber {
            field: field.to_string(),
            position,
        });
    }

    field.parse::<usize>().map_err(|_| Error::InvalidNumber {
        field: field.to_string(),
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_byte_and_eof() {
        let mut cursor = Cursor::new("IS");
        assert_eq!(cursor.read_byte().unwrap(), b'I');
        assert_eq!(cursor.peek_byte().unwrap(), b'S');
        cursor.advance().unwrap();
        assert!(!cursor.has_more_data());
        assert_eq!(
            cursor.read_byte(),
            Err(Error::UnexpectedEnd { position: 2 })
        );
    }

    #[test]
    fn test_at() {
        let cursor = Cursor::at("abc", 3).unwrap();
        assert!(!cursor.has_more_data());
        assert!(matches!(
            Cursor::at("abc", 4),
            Err(Error::UnexpectedEnd { position: 4 })
        ));

        // 'ä' occupies bytes 0..2
        assert_eq!(
            Cursor::at("äI", 1).err(),
            Some(Error::NotCharBoundary { position: 1 })
        );
        assert_eq!(Cursor::at("äI", 2).unwrap().peek_byte().unwrap(), b'I');
    }

    #[test]
    fn test_read_terminated() {
        let mut cursor = Cursor::new("string;I");
        assert_eq!(cursor.read_terminated().unwrap(), "string");
        assert_eq!(cursor.pos(), 7);
        assert_eq!(cursor.peek_byte().unwrap(), b'I');

        let mut cursor = Cursor::new(";");
        assert_eq!(cursor.read_terminated().unwrap(), "");
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn test_read_terminated_missing() {
        let mut cursor = Cursor::new("Rname");
        cursor.advance().unwrap();
        assert_eq!(
            cursor.read_terminated(),
            Err(Error::Unterminated {
                position: 1,
                terminator: ';'
            })
        );
        // a failed scan does not move the cursor
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn test_read_decimal() {
        let mut cursor = Cursor::new("42;0;");
        assert_eq!(cursor.read_decimal().unwrap(), 42);
        assert_eq!(cursor.read_decimal().unwrap(), 0);

        for bad in ["-1;", "+1;", " 1;", "1a;", ";"] {
            let mut cursor = Cursor::new(bad);
            assert!(
                matches!(cursor.read_decimal(), Err(Error::InvalidNumber { position: 0, .. })),
                "accepted {:?}",
                bad
            );
        }

        let mut cursor = Cursor::new("99999999999999999999999999;");
        assert!(matches!(
            cursor.read_decimal(),
            Err(Error::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_expect_byte() {
        let mut cursor = Cursor::new(")I");
        cursor.expect_byte(b')').unwrap();
        assert_eq!(
            cursor.expect_byte(b')'),
            Err(Error::UnexpectedCharacter {
                found: 'I',
                expected: ')',
                position: 1
            })
        );
        cursor.advance().unwrap();
        assert_eq!(
            cursor.expect_byte(b')'),
            Err(Error::UnexpectedEnd { position: 2 })
        );
    }

    #[test]
    fn test_starts_with() {
        let mut cursor = Cursor::new("I)(I)");
        assert!(!cursor.starts_with(b")("));
        cursor.advance().unwrap();
        assert!(cursor.starts_with(b")("));
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        assert!(!cursor.starts_with(b")("));
        cursor.advance().unwrap();
        assert!(!cursor.starts_with(b")("));
        assert!(cursor.starts_with(b""));
    }

    #[test]
    fn test_char_at_non_ascii() {
        let cursor = Cursor::new("Iä");
        assert_eq!(cursor.char_at(1), 'ä');
        assert_eq!(cursor.char_at(10), '\0');
    }
}
