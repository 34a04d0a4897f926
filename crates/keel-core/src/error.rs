//! Error taxonomy shared by every resolution stage.
//!
//! The plan builder surfaces these values unchanged, so a caller can match on
//! the original failure kind no matter which stage produced it.

use crate::version::VersionKind;

/// Errors that can occur while registering, validating, or resolving a target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The descriptor is structurally malformed.
    #[error("invalid descriptor: {detail}")]
    InvalidDescriptor {
        /// Description of the problem.
        detail: String,
    },

    /// A target with the same name is already registered.
    #[error("target '{name}' is already registered")]
    DuplicateTarget {
        /// The conflicting target name.
        name: String,
    },

    /// No target with this name is registered.
    #[error("unknown target: '{name}'")]
    UnknownTarget {
        /// The requested target name.
        name: String,
    },

    /// A module is referenced but has no dependency entry.
    #[error("unknown module '{name}'{}", required_by.as_deref().map(|m| format!(" (required by '{m}')")).unwrap_or_default())]
    UnknownModule {
        /// The missing module.
        name: String,
        /// The module whose dependency list named it, if any.
        required_by: Option<String>,
    },

    /// The module dependency graph contains a cycle.
    #[error("cyclic module dependency: {}", path.join(" -> "))]
    CyclicDependency {
        /// The cycle, starting and ending with the repeated module.
        path: Vec<String>,
    },

    /// A version is not in the recognized catalog.
    #[error("unsupported {kind} version '{version}'")]
    UnsupportedVersion {
        /// Which catalog was consulted.
        kind: VersionKind,
        /// The rejected version, as written.
        version: String,
    },
}

impl ResolveError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        ResolveError::InvalidDescriptor {
            detail: detail.into(),
        }
    }
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
