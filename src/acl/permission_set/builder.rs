use crate::acl::permission_set::{AclEntries, PermissionSet};
use crate::acl::{AclScope, EntryTag, NamedEntry, PermissionBits};

/// A helper for assembling a [`PermissionSet`] one entry at a time. Nothing is validated beyond
/// the types involved: empty names are accepted and duplicate qualifiers are kept in the order
/// they were added.
///
/// Any call to one of the `default_*` methods causes the resulting set to carry a default ACL.
/// The default namespace always reports the same owner and group names as the access namespace.
#[derive(Debug, Clone, Default)]
pub struct PermissionSetBuilder {
    owner_name: String,
    group_name: String,

    access: AclEntries,
    default: Option<AclEntries>,
}

impl PermissionSetBuilder {
    /// Converts the builder into the final [`PermissionSet`] instance.
    pub fn build(self) -> PermissionSet {
        let Self {
            owner_name,
            group_name,
            mut access,
            mut default,
        } = self;

        access.owner.set_name(owner_name.as_str());
        access.group.set_name(group_name.as_str());

        if let Some(default) = default.as_mut() {
            default.owner.set_name(owner_name.as_str());
            default.group.set_name(group_name.as_str());
        }

        PermissionSet { access, default }
    }

    pub fn default_group(self, bits: PermissionBits) -> Self {
        self.entry(AclScope::Default, EntryTag::OwningGroup, "", bits)
    }

    pub fn default_mask(self, bits: PermissionBits) -> Self {
        self.entry(AclScope::Default, EntryTag::Mask, "", bits)
    }

    pub fn default_named_group(self, name: impl Into<String>, bits: PermissionBits) -> Self {
        self.entry(AclScope::Default, EntryTag::NamedGroup, name, bits)
    }

    pub fn default_named_user(self, name: impl Into<String>, bits: PermissionBits) -> Self {
        self.entry(AclScope::Default, EntryTag::NamedUser, name, bits)
    }

    pub fn default_other(self, bits: PermissionBits) -> Self {
        self.entry(AclScope::Default, EntryTag::Other, "", bits)
    }

    pub fn default_owner(self, bits: PermissionBits) -> Self {
        self.entry(AclScope::Default, EntryTag::Owner, "", bits)
    }

    /// The general form all the other setters are built on. The qualifier is only meaningful for
    /// named user and named group entries and is ignored for every other tag.
    pub fn entry(
        mut self,
        scope: AclScope,
        tag: EntryTag,
        qualifier: impl Into<String>,
        bits: PermissionBits,
    ) -> Self {
        let entries = match scope {
            AclScope::Access => &mut self.access,
            AclScope::Default => self.default.get_or_insert_with(AclEntries::default),
        };

        match tag {
            EntryTag::Owner => entries.owner.set_bits(bits),
            EntryTag::OwningGroup => entries.group.set_bits(bits),
            EntryTag::Other => entries.other = bits,
            EntryTag::Mask => entries.mask = Some(bits),
            EntryTag::NamedUser => entries.users.push(NamedEntry::new(qualifier, bits)),
            EntryTag::NamedGroup => entries.groups.push(NamedEntry::new(qualifier, bits)),
        }

        self
    }

    pub fn group(self, bits: PermissionBits) -> Self {
        self.entry(AclScope::Access, EntryTag::OwningGroup, "", bits)
    }

    pub fn group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = name.into();
        self
    }

    pub fn mask(self, bits: PermissionBits) -> Self {
        self.entry(AclScope::Access, EntryTag::Mask, "", bits)
    }

    pub fn named_group(self, name: impl Into<String>, bits: PermissionBits) -> Self {
        self.entry(AclScope::Access, EntryTag::NamedGroup, name, bits)
    }

    pub fn named_user(self, name: impl Into<String>, bits: PermissionBits) -> Self {
        self.entry(AclScope::Access, EntryTag::NamedUser, name, bits)
    }

    pub fn new(owner: impl Into<String>, group: impl Into<String>) -> Self {
        let owner_name = owner.into();
        let group_name = group.into();

        Self {
            access: AclEntries::with_names(&owner_name, &group_name),
            owner_name,
            group_name,
            default: None,
        }
    }

    pub fn other(self, bits: PermissionBits) -> Self {
        self.entry(AclScope::Access, EntryTag::Other, "", bits)
    }

    pub fn owner(self, bits: PermissionBits) -> Self {
        self.entry(AclScope::Access, EntryTag::Owner, "", bits)
    }

    pub fn owner_name(mut self, name: impl Into<String>) -> Self {
        self.owner_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace_shares_names() {
        let set = PermissionSetBuilder::new("alice", "eng")
            .owner(PermissionBits::ALL)
            .default_owner(PermissionBits::from(0o6))
            .default_named_user("bob", PermissionBits::from(0o4))
            .owner_name("root")
            .build();

        let default = set.default_entries().expect("default namespace present");
        assert_eq!(default.owner().name(), "root");
        assert_eq!(default.group().name(), "eng");
        assert_eq!(default.owner().bits(), PermissionBits::from(0o6));
        assert_eq!(default.users().len(), 1);

        assert_eq!(set.owner_name(), "root");
        assert_eq!(set.access().owner().bits(), PermissionBits::ALL);
        assert!(set.access().users().is_empty());
    }

    #[test]
    fn test_empty_names_are_accepted() {
        let set = PermissionSetBuilder::new("", "")
            .named_user("", PermissionBits::ALL)
            .build();

        assert_eq!(set.owner_name(), "");
        assert_eq!(set.access().users()[0].name(), "");
    }

    #[test]
    fn test_qualifier_ignored_for_unqualified_tags() {
        let set = PermissionSetBuilder::new("alice", "eng")
            .entry(AclScope::Access, EntryTag::Other, "ignored", PermissionBits::from(0o4))
            .build();

        assert_eq!(set.access().other(), PermissionBits::from(0o4));
        assert!(set.access().users().is_empty());
        assert!(set.access().groups().is_empty());
    }
}
