//! Configuration for signature decoding.
//!
//! [`DecoderConfig`] controls the limits and the canonical separators a decode runs with. The
//! defaults match the encoder used by the toolchain, so most callers never construct one
//! explicitly and go through [`crate::decode`] / [`crate::decode_standalone`] instead.

/// Default maximum nesting depth of a single signature.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default separator placed between a package path and its version.
pub const DEFAULT_VERSION_SEPARATOR: char = ':';

/// Configuration for a signature decode.
///
/// # Examples
///
/// ```rust
/// use typesig::DecoderConfig;
///
/// let config = DecoderConfig::default()
///     .with_max_depth(16)
///     .with_version_separator('@');
/// assert_eq!(config.max_depth, 16);
/// assert_eq!(config.version_separator, '@');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum nesting depth of composite types (default: 64)
    /// Deeper signatures fail with [`crate::Error::RecursionLimit`]
    pub max_depth: usize,

    /// Separator joining a package path and its version into the effective package path
    /// handed to [`crate::TypeFactory::reference_type`] (default: `:`)
    pub version_separator: char,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            version_separator: DEFAULT_VERSION_SEPARATOR,
        }
    }
}

impl DecoderConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the package path / version separator.
    #[must_use]
    pub fn with_version_separator(mut self, separator: char) -> Self {
        self.version_separator = separator;
        self
    }
}
