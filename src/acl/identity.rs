use std::collections::BTreeSet;

/// The requesting side of an access check: a user name and every group the user is a member of,
/// primary and supplementary alike.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identity {
    name: String,
    groups: BTreeSet<String>,
}

impl Identity {
    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    /// Group membership check. An empty group name denotes an unknown group and is never a match.
    pub fn is_member_of(&self, group: &str) -> bool {
        !group.is_empty() && self.groups.contains(group)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn new<I, G>(name: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        Self {
            name: name.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::new(name, Vec::<String>::new())
    }
}
