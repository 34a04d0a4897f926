//! Target build categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// The kind of artifact a target produces.
///
/// This is a closed set: unrecognized categories are rejected when text is
/// converted, long before resolution starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetCategory {
    /// A standalone game executable.
    Game,
    /// An editor build with tooling modules.
    Editor,
    /// A client-only build (no server code).
    Client,
    /// A dedicated server build.
    Server,
    /// A standalone program such as a tool or commandlet.
    Program,
}

impl TargetCategory {
    /// All recognized categories, in declaration order.
    pub const ALL: [TargetCategory; 5] = [
        TargetCategory::Game,
        TargetCategory::Editor,
        TargetCategory::Client,
        TargetCategory::Server,
        TargetCategory::Program,
    ];

    /// Lowercase canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetCategory::Game => "game",
            TargetCategory::Editor => "editor",
            TargetCategory::Client => "client",
            TargetCategory::Server => "server",
            TargetCategory::Program => "program",
        }
    }
}

impl fmt::Display for TargetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetCategory {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ResolveError::invalid(format!(
                    "unrecognized target category '{s}' (expected one of: game, editor, client, server, program)"
                ))
            })
    }
}

impl TryFrom<String> for TargetCategory {
    type Error = ResolveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetCategory> for String {
    fn from(value: TargetCategory) -> Self {
        value.as_str().to_string()
    }
}
