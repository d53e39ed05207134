//! Qualified-name parsing for references to user-defined types.
//!
//! A qualified reference carries its name as `[packagePath:[version:]]name`. The split is purely
//! positional: three parts are always `(path, version, name)`, never `(org, path, name)`, and a
//! single part is a bare name with no package at all.

use crate::{signature::tags::TYPE_TAG, Error, Result};

/// The logical parts of a qualified type name.
///
/// # Examples
///
/// ```rust
/// use typesig::QualifiedName;
///
/// let name = QualifiedName::parse("myorg/geo:1.2.0:Point", 0)?;
/// assert_eq!(name.package_path, Some("myorg/geo"));
/// assert_eq!(name.version, Some("1.2.0"));
/// assert_eq!(name.name, "Point");
/// assert_eq!(name.effective_package_path(':'), "myorg/geo:1.2.0");
/// # Ok::<(), typesig::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName<'a> {
    /// Organization/package path, `None` for a bare name
    pub package_path: Option<&'a str>,
    /// Package version, only present in the 3-part form
    pub version: Option<&'a str>,
    /// Type name (for a bare name this is the whole body)
    pub name: &'a str,
}

impl<'a> QualifiedName<'a> {
    /// Split a qualified body (the text between the tag and its `;`) into its parts.
    ///
    /// ## Arguments
    /// * `body` - The qualified body, excluding tag and terminator
    /// * `position` - Byte offset of the qualified tag, used for error reporting
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedQualifiedName`] if the body splits into more than three
    /// parts.
    pub fn parse(body: &'a str, position: usize) -> Result<Self> {
        let parts: Vec<&'a str> = body.split(char::from(TYPE_TAG::NAME_SEPARATOR)).collect();
        let qualified = match parts[..] {
            [name] => QualifiedName {
                package_path: None,
                version: None,
                name,
            },
            [package_path, name] => QualifiedName {
                package_path: Some(package_path),
                version: None,
                name,
            },
            [package_path, version, name] => QualifiedName {
                package_path: Some(package_path),
                version: Some(version),
                name,
            },
            _ => {
                return Err(Error::MalformedQualifiedName {
                    name: body.to_string(),
                    position,
                })
            }
        };

        Ok(qualified)
    }

    /// Returns `true` if the name carries no package path.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.package_path.is_none()
    }

    /// The package path handed to the type factory: path and version joined with `separator`
    /// when a version is present, the plain path otherwise, and empty for bare names.
    #[must_use]
    pub fn effective_package_path(&self, separator: char) -> String {
        match (self.package_path, self.version) {
            (Some(path), Some(version)) => format!("{path}{separator}{version}"),
            (Some(path), None) => path.to_string(),
            (None, _) => String::new(),
        }
    }
}
