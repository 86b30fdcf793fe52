#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the compiler crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the routing tree builder, the panel decoder
/// and the document loaders.
///
/// Decoding errors are never recovered internally: an unrecognized enum
/// string or an unusable target list is reported to the caller, which decides
/// whether to reject the whole dashboard or skip the panel.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// A panel declared targets but none of them carries a source block.
    #[error("panel target is not configured: at least one target needs a source")]
    TargetNotConfigured,
    /// The visualization sort order is not one of the accepted literals.
    #[error("invalid sort order '{value}': expected \"asc\" or \"desc\"")]
    InvalidSortOrder {
        /// Value found in the panel description.
        value: String
    },
    /// The visualization deduplication strategy is not recognized.
    #[error(
        "invalid deduplication strategy '{value}': expected one of \"none\", \"exact\", \"signature\", \"numbers\""
    )]
    InvalidDeduplicationStrategy {
        /// Value found in the panel description.
        value: String
    },
    /// Two contact points share the same name.
    #[error("duplicate contact point '{name}'")]
    DuplicateContactPoint {
        /// Offending contact point name.
        name: String
    },
    /// A route or the default receiver references an undeclared contact point.
    #[error("unknown contact point '{name}'")]
    UnknownContactPoint {
        /// Name that could not be resolved.
        name: String
    },
    /// A routing matcher is malformed.
    #[error("invalid matcher: {message}")]
    InvalidMatcher {
        /// Human readable description of the problem.
        message: String
    },
    /// Returned when a document violates invariants not covered above.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Wraps I/O errors that occur while reading documents.
    #[error("failed to read document from {path:?}: {source}")]
    Io {
        /// Location of the document.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse document: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps JSON encoding errors raised while marshaling native objects.
    #[error("failed to serialize configuration: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a matcher error from the provided displayable value.
    pub fn invalid_matcher<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::InvalidMatcher {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation
    /// and is what the CLI prints before exiting.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the document that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn validation_constructor_populates_message() {
        let error = Error::validation("something went wrong");
        match error {
            Error::Validation {
                ref message
            } => {
                assert_eq!(message, "something went wrong");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::InvalidSortOrder {
            value: "sideways".to_owned()
        };
        assert_eq!(error.to_string(), error.to_display_string());
        assert!(error.to_string().contains("sideways"));
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/alerting.yaml");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_parse_variant() {
        let error = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: Error = error.into();
        assert!(matches!(mapped, Error::Parse { .. }));
    }

    #[test]
    fn serde_json_conversion_maps_to_serialize_variant() {
        let invalid = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Serialize { .. }));
    }

    #[test]
    fn unknown_contact_point_names_the_receiver() {
        let error = Error::UnknownContactPoint {
            name: "team-z".to_owned()
        };
        assert_eq!(error.to_string(), "unknown contact point 'team-z'");
    }
}
