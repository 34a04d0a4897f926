//! Core data model for the Keel target-configuration resolver.
//!
//! A target is described by a [`TargetDescriptor`]: its build category, the
//! baseline settings revision, the include-order convention, and the modules
//! it links. Descriptors live in a [`DescriptorStore`] and are checked by
//! [`validate`] before any dependency resolution happens.
//!
//! Every failure in the resolution pipeline is a [`ResolveError`].

pub mod category;
pub mod descriptor;
pub mod error;
pub mod store;
pub mod validate;
pub mod version;

pub use category::TargetCategory;
pub use descriptor::TargetDescriptor;
pub use error::{ResolveError, Result};
pub use store::DescriptorStore;
pub use validate::validate;
pub use version::{VersionCatalog, VersionKind, VersionTag};
