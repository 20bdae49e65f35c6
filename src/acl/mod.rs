//! # Permission Model
//!
//! Plain value types describing the permission picture of a single path: the owner, owning group,
//! and other entries of the classic mode, the named user and named group entries of an extended
//! ACL, the mask capping them, and the default ACL a directory hands to its children. Nothing in
//! here makes decisions, that is left to [`crate::engine`].

mod access_mode;
mod entry;
mod identity;
mod permission_bits;
mod permission_set;

pub use access_mode::{AccessMode, InvalidRequest};
pub use entry::{AclScope, EntryTag, NamedEntry};
pub use identity::Identity;
pub use permission_bits::{PermissionBits, PermissionBitsError};
pub use permission_set::{AclEntries, PermissionSet, PermissionSetBuilder};

/// Returns true when `bits` has at least one of the bits in the requested mode set.
pub fn contains_permissions(bits: PermissionBits, mode: AccessMode) -> bool {
    bits.contains_any(mode)
}
