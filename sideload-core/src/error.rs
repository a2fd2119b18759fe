//! Error types for property paths and graph limits

use thiserror::Error;

/// Errors raised while building property paths or enforcing limits
///
/// Traversal itself never fails: a path that does not match simply yields
/// nothing. These errors describe malformed paths and oversized graphs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path string was empty
    #[error(
        "Empty property path.\n\
         \n\
         Property paths name at least one key, e.g. 'metadata.authors'."
    )]
    EmptyPath,

    /// Path contains an empty segment (leading, trailing or doubled dot)
    #[error(
        "Empty segment in property path '{path}' at position {position}.\n\
         \n\
         Segments are separated by single dots. Remove the leading, trailing \
         or doubled '.' from the path."
    )]
    EmptySegment {
        /// The offending path string
        path: String,
        /// Zero-based index of the empty segment
        position: usize,
    },

    /// Path string too long
    #[error(
        "Property path too long: {length} characters (max: {max_length}).\n\
         \n\
         This limit prevents malicious inputs. If you have a legitimate use case,\n\
         raise `max_path_length` in the transformation limits."
    )]
    PathTooLong {
        /// The path string that exceeded the limit
        path: String,
        /// Actual length of the path string (characters)
        length: usize,
        /// Maximum path length allowed (characters)
        max_length: usize,
    },

    /// Path has more segments than allowed
    #[error(
        "Property path '{path}' has {segments} segments (max: {max_segments}).\n\
         \n\
         Suggested fixes:\n\
         1. Raise `max_path_segments` in the transformation limits\n\
         2. Flatten the input structure before sideloading"
    )]
    TooManySegments {
        /// The path string that exceeded the limit
        path: String,
        /// Actual number of segments
        segments: usize,
        /// Maximum number of segments allowed
        max_segments: usize,
    },

    /// Input graph nests deeper than allowed
    #[error(
        "Input nests {depth} levels deep (max: {max_depth}).\n\
         \n\
         Deeply nested graphs are rejected before they are copied. Raise\n\
         `max_nesting_depth` in the transformation limits if this input is legitimate."
    )]
    NestingTooDeep {
        /// Depth at which the limit was exceeded
        depth: usize,
        /// Maximum nesting depth allowed
        max_depth: usize,
    },

    /// Configuration exceeds hard limits
    #[error(
        "Configuration exceeds hard limits: {reason}\n\
         \n\
         Hard limits:\n\
         - max_path_length: {max_path_length} characters\n\
         - max_path_segments: {max_path_segments}\n\
         - max_nesting_depth: {max_nesting_depth}"
    )]
    ConfigurationExceedsHardLimits {
        /// Description of which limit was exceeded
        reason: String,
        /// Hard maximum path length (characters)
        max_path_length: usize,
        /// Hard maximum number of path segments
        max_path_segments: usize,
        /// Hard maximum nesting depth
        max_nesting_depth: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PathError>;
