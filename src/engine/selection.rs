use crate::acl::{contains_permissions, AccessMode, AclEntries, EntryTag, Identity, PermissionBits};

/// Outcome of the entry selection step. Exactly one entry class determines access, unless the
/// identity matched a group entry that lacked the requested permissions in which case the
/// decision is already made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Owner(PermissionBits),
    NamedUser(PermissionBits),
    OwningGroup(PermissionBits),
    NamedGroup(PermissionBits),
    Other(PermissionBits),
    DeniedByGroup(GroupDenial),
}

impl Selection {
    /// The class and permissions of the selected entry, or the group rule that already denied
    /// access without selecting one.
    pub fn entry(&self) -> Result<(EntryTag, PermissionBits), GroupDenial> {
        match *self {
            Self::Owner(bits) => Ok((EntryTag::Owner, bits)),
            Self::NamedUser(bits) => Ok((EntryTag::NamedUser, bits)),
            Self::OwningGroup(bits) => Ok((EntryTag::OwningGroup, bits)),
            Self::NamedGroup(bits) => Ok((EntryTag::NamedGroup, bits)),
            Self::Other(bits) => Ok((EntryTag::Other, bits)),
            Self::DeniedByGroup(denial) => Err(denial),
        }
    }
}

/// Which group rule matched the identity without granting the requested permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDenial {
    /// The identity is a member of the owning group and the owning group entry lacks the
    /// requested permissions.
    OwningGroup,

    /// The identity is a member of one or more named groups and none of those entries contain the
    /// requested permissions.
    NamedGroups,
}

/// Selects the single entry that determines access, checked in the fixed order owner, named user,
/// owning group, named groups, other.
///
/// The owning group and named group rules are alternatives: named groups are only consulted when
/// the identity isn't a member of the owning group at all. When several named group entries
/// match, the first one in collection order that contains the requested mode is selected.
pub fn select_entry(identity: &Identity, entries: &AclEntries, mode: AccessMode) -> Selection {
    // empty names stand for an unknown user and must never match
    let user_known = !identity.name().is_empty();

    if user_known && identity.name() == entries.owner().name() {
        return Selection::Owner(entries.owner().bits());
    }

    if let Some(user) = entries.named_user(identity.name()).filter(|_| user_known) {
        return Selection::NamedUser(user.bits());
    }

    if identity.is_member_of(entries.group().name()) {
        let bits = entries.group().bits();

        if contains_permissions(bits, mode) {
            return Selection::OwningGroup(bits);
        }

        return Selection::DeniedByGroup(GroupDenial::OwningGroup);
    }

    let mut matched_named_group = false;
    for group in entries.named_groups_matching(identity) {
        matched_named_group = true;

        if contains_permissions(group.bits(), mode) {
            return Selection::NamedGroup(group.bits());
        }
    }

    if matched_named_group {
        return Selection::DeniedByGroup(GroupDenial::NamedGroups);
    }

    Selection::Other(entries.other())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::acl::PermissionSet;

    fn reference_entries() -> AclEntries {
        PermissionSet::builder("alice", "eng")
            .owner(PermissionBits::from(0o7))
            .group(PermissionBits::from(0o5))
            .other(PermissionBits::from(0o0))
            .mask(PermissionBits::from(0o5))
            .named_user("bob", PermissionBits::from(0o6))
            .named_group("ops", PermissionBits::from(0o4))
            .named_group("qa", PermissionBits::from(0o2))
            .build()
            .access()
            .clone()
    }

    #[test]
    fn test_selection_entry() {
        assert_eq!(
            Selection::NamedGroup(PermissionBits::from(0o4)).entry(),
            Ok((EntryTag::NamedGroup, PermissionBits::from(0o4)))
        );
        assert_eq!(
            Selection::DeniedByGroup(GroupDenial::NamedGroups).entry(),
            Err(GroupDenial::NamedGroups)
        );
    }

    #[test]
    fn test_owner_selected_regardless_of_groups() {
        let entries = reference_entries();
        let identity = Identity::new("alice", ["eng", "ops"]);

        assert_eq!(
            select_entry(&identity, &entries, AccessMode::WRITE),
            Selection::Owner(PermissionBits::ALL)
        );
    }

    #[test]
    fn test_named_user_selected_before_owning_group() {
        let entries = reference_entries();
        let identity = Identity::new("bob", ["eng"]);

        assert_eq!(
            select_entry(&identity, &entries, AccessMode::EXECUTE),
            Selection::NamedUser(PermissionBits::from(0o6))
        );
    }

    #[test]
    fn test_owning_group_denial_skips_named_groups() {
        let entries = reference_entries();
        // qa would grant write but the owning group match takes precedence
        let identity = Identity::new("dave", ["eng", "qa"]);

        assert_eq!(
            select_entry(&identity, &entries, AccessMode::WRITE),
            Selection::DeniedByGroup(GroupDenial::OwningGroup)
        );
    }

    #[test]
    fn test_first_containing_named_group_selected() {
        let entries = reference_entries();
        let identity = Identity::new("erin", ["qa", "ops"]);

        assert_eq!(
            select_entry(&identity, &entries, AccessMode::WRITE),
            Selection::NamedGroup(PermissionBits::from(0o2))
        );
        assert_eq!(
            select_entry(&identity, &entries, AccessMode::READ),
            Selection::NamedGroup(PermissionBits::from(0o4))
        );
        assert_eq!(
            select_entry(&identity, &entries, AccessMode::EXECUTE),
            Selection::DeniedByGroup(GroupDenial::NamedGroups)
        );
    }

    #[test]
    fn test_other_selected_without_any_match() {
        let entries = reference_entries();
        let identity = Identity::new("frank", ["sales"]);

        assert_eq!(
            select_entry(&identity, &entries, AccessMode::READ),
            Selection::Other(PermissionBits::NONE)
        );
    }

    #[test]
    fn test_empty_owner_name_never_matches_real_identity() {
        let entries = PermissionSet::builder("", "")
            .owner(PermissionBits::ALL)
            .other(PermissionBits::from(0o4))
            .build()
            .access()
            .clone();

        let identity = Identity::user("alice");
        assert_eq!(
            select_entry(&identity, &entries, AccessMode::READ),
            Selection::Other(PermissionBits::from(0o4))
        );

        let anonymous = Identity::new("", [""]);
        assert_eq!(
            select_entry(&anonymous, &entries, AccessMode::READ),
            Selection::Other(PermissionBits::from(0o4))
        );
    }

    #[test]
    fn test_duplicate_named_groups_scanned_in_order() {
        let entries = PermissionSet::builder("alice", "eng")
            .named_group("ops", PermissionBits::from(0o4))
            .named_group("ops", PermissionBits::from(0o6))
            .build()
            .access()
            .clone();

        let identity = Identity::new("carol", ["ops"]);
        assert_eq!(
            select_entry(&identity, &entries, AccessMode::WRITE),
            Selection::NamedGroup(PermissionBits::from(0o6))
        );
    }
}
