//! Ordered version tags and the catalog of recognized versions.
//!
//! Settings revisions and include-order conventions are both identified by
//! ordered tags. Engines label them in several styles (`V2`, `Unreal5_1`,
//! `5.1`); all of them normalize to a numeric `semver::Version` so tags
//! compare monotonically regardless of how they were written.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};

/// An ordered version tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTag(semver::Version);

impl VersionTag {
    /// Create a tag from numeric components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionTag(semver::Version::new(major, minor, patch))
    }

    /// The underlying numeric version.
    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.0;
        if v.patch == 0 {
            write!(f, "{}.{}", v.major, v.minor)
        } else {
            write!(f, "{}.{}.{}", v.major, v.minor, v.patch)
        }
    }
}

impl FromStr for VersionTag {
    type Err = ResolveError;

    /// Accepts `2`, `5.1`, `5.1.0`, and prefixed labels such as `V2` or
    /// `Unreal5_1`.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ResolveError::invalid(format!("malformed version tag '{s}'"));

        let numeric = s.trim().trim_start_matches(|c: char| c.is_ascii_alphabetic());
        if numeric.is_empty() {
            return Err(malformed());
        }

        let mut parts = [0u64; 3];
        let mut count = 0;
        for piece in numeric.split(|c| c == '.' || c == '_') {
            if count == parts.len() || piece.is_empty() {
                return Err(malformed());
            }
            parts[count] = piece.parse().map_err(|_| malformed())?;
            count += 1;
        }

        Ok(VersionTag::new(parts[0], parts[1], parts[2]))
    }
}

impl TryFrom<String> for VersionTag {
    type Error = ResolveError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<VersionTag> for String {
    fn from(value: VersionTag) -> Self {
        value.to_string()
    }
}

/// Which family of versions a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionKind {
    /// Baseline compiler/linker settings revision.
    Settings,
    /// Header/source include-order convention.
    IncludeOrder,
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionKind::Settings => f.write_str("settings"),
            VersionKind::IncludeOrder => f.write_str("include-order"),
        }
    }
}

/// The set of versions a resolver recognizes, per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCatalog {
    settings: BTreeSet<VersionTag>,
    include_order: BTreeSet<VersionTag>,
}

impl VersionCatalog {
    /// Create a catalog from explicit version sets.
    pub fn new(
        settings: impl IntoIterator<Item = VersionTag>,
        include_order: impl IntoIterator<Item = VersionTag>,
    ) -> Self {
        Self {
            settings: settings.into_iter().collect(),
            include_order: include_order.into_iter().collect(),
        }
    }

    /// The built-in catalog: settings revisions 1 through 5 and
    /// include-order conventions 5.0 through 5.4.
    pub fn builtin() -> Self {
        Self::new(
            (1..=5).map(|major| VersionTag::new(major, 0, 0)),
            (0..=4).map(|minor| VersionTag::new(5, minor, 0)),
        )
    }

    /// Replace the recognized settings versions.
    pub fn with_settings(mut self, versions: impl IntoIterator<Item = VersionTag>) -> Self {
        self.settings = versions.into_iter().collect();
        self
    }

    /// Replace the recognized include-order versions.
    pub fn with_include_order(mut self, versions: impl IntoIterator<Item = VersionTag>) -> Self {
        self.include_order = versions.into_iter().collect();
        self
    }

    fn set(&self, kind: VersionKind) -> &BTreeSet<VersionTag> {
        match kind {
            VersionKind::Settings => &self.settings,
            VersionKind::IncludeOrder => &self.include_order,
        }
    }

    /// Whether `tag` is a recognized version of the given kind.
    pub fn recognizes(&self, kind: VersionKind, tag: &VersionTag) -> bool {
        self.set(kind).contains(tag)
    }

    /// Fail with `UnsupportedVersion` unless `tag` is recognized.
    pub fn require(&self, kind: VersionKind, tag: &VersionTag) -> Result<()> {
        if self.recognizes(kind, tag) {
            Ok(())
        } else {
            Err(ResolveError::UnsupportedVersion {
                kind,
                version: tag.to_string(),
            })
        }
    }

    /// The newest recognized version of the given kind.
    pub fn latest(&self, kind: VersionKind) -> Option<&VersionTag> {
        self.set(kind).last()
    }

    /// Recognized versions of the given kind, oldest first.
    pub fn versions(&self, kind: VersionKind) -> impl Iterator<Item = &VersionTag> {
        self.set(kind).iter()
    }
}

impl Default for VersionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> VersionTag {
        s.parse().unwrap()
    }

    #[test]
    fn parse_label_styles() {
        assert_eq!(tag("V2"), VersionTag::new(2, 0, 0));
        assert_eq!(tag("Unreal5_1"), VersionTag::new(5, 1, 0));
        assert_eq!(tag("5.1"), VersionTag::new(5, 1, 0));
        assert_eq!(tag(" 5.1.3 "), VersionTag::new(5, 1, 3));
        assert_eq!(tag("3"), VersionTag::new(3, 0, 0));
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "V", "Latest", "5..1", "5.1.2.3", "5.x", "5_"] {
            let err = bad.parse::<VersionTag>().unwrap_err();
            assert!(
                matches!(err, ResolveError::InvalidDescriptor { .. }),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn tags_compare_numerically() {
        assert!(tag("V2") < tag("V10"));
        assert!(tag("Unreal5_0") < tag("5.1"));
        assert!(tag("5.1") < tag("5.1.1"));
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(tag("V2").to_string(), "2.0");
        assert_eq!(tag("Unreal5_3").to_string(), "5.3");
        assert_eq!(tag("1.2.3").to_string(), "1.2.3");
    }

    #[test]
    fn builtin_catalog_contents() {
        let catalog = VersionCatalog::builtin();
        assert!(catalog.recognizes(VersionKind::Settings, &tag("V1")));
        assert!(catalog.recognizes(VersionKind::Settings, &tag("V5")));
        assert!(!catalog.recognizes(VersionKind::Settings, &tag("V6")));
        assert!(catalog.recognizes(VersionKind::IncludeOrder, &tag("Unreal5_1")));
        assert!(!catalog.recognizes(VersionKind::IncludeOrder, &tag("4.27")));
        assert_eq!(catalog.latest(VersionKind::Settings), Some(&tag("V5")));
        assert_eq!(catalog.latest(VersionKind::IncludeOrder), Some(&tag("5.4")));
    }

    #[test]
    fn require_reports_kind_and_version() {
        let catalog = VersionCatalog::builtin();
        let err = catalog
            .require(VersionKind::IncludeOrder, &tag("4.27"))
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnsupportedVersion {
                kind: VersionKind::IncludeOrder,
                version: "4.27".into(),
            }
        );
    }

    #[test]
    fn replacing_a_set_keeps_the_other() {
        let catalog = VersionCatalog::builtin().with_settings([tag("V7")]);
        assert_eq!(catalog.versions(VersionKind::Settings).count(), 1);
        assert_eq!(catalog.versions(VersionKind::IncludeOrder).count(), 5);
    }

    #[test]
    fn serde_uses_text_form() {
        let json = serde_json::to_string(&tag("Unreal5_2")).unwrap();
        assert_eq!(json, "\"5.2\"");
        let parsed: VersionTag = serde_json::from_str("\"V3\"").unwrap();
        assert_eq!(parsed, tag("3"));
    }
}
