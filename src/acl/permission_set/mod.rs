mod builder;

pub use builder::PermissionSetBuilder;

use std::collections::{BTreeSet, HashSet};

use crate::acl::{EntryTag, Identity, NamedEntry, PermissionBits};

/// One namespace worth of ACL entries, either the access ACL of an object or the default ACL of a
/// directory.
///
/// Named entries are kept in the order they were supplied in but lookups are by name, never by
/// position. Well-formed ACLs never repeat a qualifier, if a resolver does hand over duplicates
/// the first entry in collection order is the one that will be found by [`Self::named_user`] and
/// named groups are offered in collection order by [`Self::named_groups_matching`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AclEntries {
    owner: NamedEntry,
    group: NamedEntry,
    other: PermissionBits,
    mask: Option<PermissionBits>,

    users: Vec<NamedEntry>,
    groups: Vec<NamedEntry>,
}

impl AclEntries {
    /// Returns every (tag, name) pair that appears more than once among the named entries.
    pub fn duplicate_qualifiers(&self) -> Vec<(EntryTag, String)> {
        let mut duplicates = Vec::new();

        for (tag, entries) in [
            (EntryTag::NamedUser, &self.users),
            (EntryTag::NamedGroup, &self.groups),
        ] {
            let mut seen = HashSet::new();
            let mut reported = BTreeSet::new();

            for entry in entries {
                if !seen.insert(entry.name()) && reported.insert(entry.name()) {
                    duplicates.push((tag, entry.name().to_string()));
                }
            }
        }

        duplicates
    }

    pub fn group(&self) -> &NamedEntry {
        &self.group
    }

    pub fn groups(&self) -> &[NamedEntry] {
        &self.groups
    }

    /// A minimal ACL is one that carries no more information than a classic permission mode: no
    /// named entries and no mask.
    pub fn is_minimal(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty() && self.mask.is_none()
    }

    pub fn mask(&self) -> Option<PermissionBits> {
        self.mask
    }

    /// Named group entries whose qualifier is one of the identity's groups, in collection order.
    pub fn named_groups_matching<'a>(
        &'a self,
        identity: &'a Identity,
    ) -> impl Iterator<Item = &'a NamedEntry> + 'a {
        self.groups
            .iter()
            .filter(move |entry| identity.is_member_of(entry.name()))
    }

    pub fn named_user(&self, name: &str) -> Option<&NamedEntry> {
        self.users.iter().find(|entry| entry.name() == name)
    }

    pub fn other(&self) -> PermissionBits {
        self.other
    }

    pub fn owner(&self) -> &NamedEntry {
        &self.owner
    }

    pub fn users(&self) -> &[NamedEntry] {
        &self.users
    }

    pub(crate) fn with_names(owner: &str, group: &str) -> Self {
        Self {
            owner: NamedEntry::new(owner, PermissionBits::NONE),
            group: NamedEntry::new(group, PermissionBits::NONE),
            ..Self::default()
        }
    }
}

/// The complete permission picture of a single path as produced by a resolver. Constructed fresh
/// for each access check and never mutated afterwards.
///
/// Only the access entries take part in access decisions. The default entries are what a
/// directory hands down to children created inside it and never apply to the directory itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PermissionSet {
    access: AclEntries,
    default: Option<AclEntries>,
}

impl PermissionSet {
    pub fn access(&self) -> &AclEntries {
        &self.access
    }

    pub fn builder(owner: impl Into<String>, group: impl Into<String>) -> PermissionSetBuilder {
        PermissionSetBuilder::new(owner, group)
    }

    pub fn default_entries(&self) -> Option<&AclEntries> {
        self.default.as_ref()
    }

    /// Builds the minimal ACL equivalent to a classic `rwxrwxrwx` mode. Bits outside of the
    /// lowest nine (setuid, setgid, sticky, file type) are ignored.
    pub fn from_mode(owner: impl Into<String>, group: impl Into<String>, mode: u32) -> Self {
        Self::builder(owner, group)
            .owner(PermissionBits::from(((mode >> 6) & 0o7) as u8))
            .group(PermissionBits::from(((mode >> 3) & 0o7) as u8))
            .other(PermissionBits::from((mode & 0o7) as u8))
            .build()
    }

    pub fn group_name(&self) -> &str {
        self.access.group.name()
    }

    pub fn is_minimal(&self) -> bool {
        self.access.is_minimal() && self.default.is_none()
    }

    pub fn owner_name(&self) -> &str {
        self.access.owner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mode() {
        let set = PermissionSet::from_mode("alice", "eng", 0o100754);

        assert_eq!(set.owner_name(), "alice");
        assert_eq!(set.group_name(), "eng");

        assert_eq!(set.access().owner().bits(), PermissionBits::ALL);
        assert_eq!(set.access().group().bits().to_string(), "r-x");
        assert_eq!(set.access().other().to_string(), "r--");

        assert!(set.is_minimal());
        assert!(set.default_entries().is_none());
    }

    #[test]
    fn test_named_user_first_wins_on_duplicates() {
        let set = PermissionSet::builder("alice", "eng")
            .named_user("bob", PermissionBits::from(0o6))
            .named_user("bob", PermissionBits::from(0o1))
            .build();

        let entry = set.access().named_user("bob").unwrap();
        assert_eq!(entry.bits(), PermissionBits::from(0o6));
        assert!(set.access().named_user("carol").is_none());
    }

    #[test]
    fn test_named_groups_matching_keeps_collection_order() {
        let set = PermissionSet::builder("alice", "eng")
            .named_group("ops", PermissionBits::from(0o4))
            .named_group("qa", PermissionBits::from(0o2))
            .named_group("dev", PermissionBits::from(0o1))
            .build();

        let identity = Identity::new("carol", ["dev", "ops"]);
        let names: Vec<&str> = set
            .access()
            .named_groups_matching(&identity)
            .map(|entry| entry.name())
            .collect();

        assert_eq!(names, vec!["ops", "dev"]);
    }

    #[test]
    fn test_duplicate_qualifiers_reported_once() {
        let set = PermissionSet::builder("alice", "eng")
            .named_user("bob", PermissionBits::NONE)
            .named_user("bob", PermissionBits::ALL)
            .named_user("bob", PermissionBits::ALL)
            .named_group("bob", PermissionBits::ALL)
            .named_group("ops", PermissionBits::NONE)
            .named_group("ops", PermissionBits::NONE)
            .build();

        assert_eq!(
            set.access().duplicate_qualifiers(),
            vec![
                (EntryTag::NamedUser, "bob".to_string()),
                (EntryTag::NamedGroup, "ops".to_string()),
            ]
        );
    }

    #[test]
    fn test_mask_makes_acl_extended() {
        let set = PermissionSet::builder("alice", "eng")
            .mask(PermissionBits::from(0o5))
            .build();

        assert!(!set.is_minimal());
        assert_eq!(set.access().mask(), Some(PermissionBits::from(0o5)));
    }
}
