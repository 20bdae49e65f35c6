use std::fmt::{self, Display, Formatter};

use crate::acl::PermissionBits;

/// The identity class an ACL entry binds its permissions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryTag {
    Owner,
    NamedUser,
    OwningGroup,
    NamedGroup,
    Other,
    Mask,
}

impl EntryTag {
    /// Named users, the owning group, and named groups make up the "group class" whose effective
    /// permissions are capped by the mask entry. Owner and other are never capped.
    pub fn is_mask_capped(&self) -> bool {
        matches!(self, Self::NamedUser | Self::OwningGroup | Self::NamedGroup)
    }
}

impl Display for EntryTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Owner => "owner",
            Self::NamedUser => "named user",
            Self::OwningGroup => "owning group",
            Self::NamedGroup => "named group",
            Self::Other => "other",
            Self::Mask => "mask",
        };

        f.write_str(name)
    }
}

/// Whether an entry applies to the object itself or is only inherited by new children of a
/// directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AclScope {
    #[default]
    Access,
    Default,
}

/// Permissions bound to a user or group by name. An empty name is legal and simply never matches
/// a requesting identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedEntry {
    name: String,
    bits: PermissionBits,
}

impl NamedEntry {
    pub fn bits(&self) -> PermissionBits {
        self.bits
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn new(name: impl Into<String>, bits: PermissionBits) -> Self {
        Self {
            name: name.into(),
            bits,
        }
    }

    pub(crate) fn set_bits(&mut self, bits: PermissionBits) {
        self.bits = bits;
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_capped_classes() {
        assert!(EntryTag::NamedUser.is_mask_capped());
        assert!(EntryTag::OwningGroup.is_mask_capped());
        assert!(EntryTag::NamedGroup.is_mask_capped());

        assert!(!EntryTag::Owner.is_mask_capped());
        assert!(!EntryTag::Other.is_mask_capped());
        assert!(!EntryTag::Mask.is_mask_capped());
    }
}
