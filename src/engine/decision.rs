use std::fmt::{self, Display, Formatter};

use crate::acl::EntryTag;
use crate::engine::GroupDenial;

/// The result of an access check along with the rule that produced it. There are no partial
/// grants, either every requested permission is available or access is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    reason: DecisionReason,
}

impl AccessDecision {
    pub(crate) fn new(reason: DecisionReason) -> Self {
        Self { reason }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self.reason, DecisionReason::Granted(_))
    }

    pub fn reason(&self) -> DecisionReason {
        self.reason
    }

    /// The entry class that determined access, if the decision got as far as selecting one.
    pub fn selected(&self) -> Option<EntryTag> {
        match self.reason {
            DecisionReason::Granted(tag)
            | DecisionReason::EntryLacksMode(tag)
            | DecisionReason::MaskLacksMode(tag) => Some(tag),
            DecisionReason::GroupDenied(_) => None,
        }
    }
}

impl Display for AccessDecision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_granted() { "granted" } else { "denied" };
        write!(f, "{verdict}: {}", self.reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// The selected entry (and the mask, where it applies) contain the requested mode.
    Granted(EntryTag),

    /// The selected entry itself doesn't contain the requested mode.
    EntryLacksMode(EntryTag),

    /// The selected entry contains the requested mode but the mask caps it away.
    MaskLacksMode(EntryTag),

    /// The identity matched a group entry lacking the requested mode, other is never consulted.
    GroupDenied(GroupDenial),
}

impl Display for DecisionReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted(tag) => write!(f, "{tag} entry contains the requested mode"),
            Self::EntryLacksMode(tag) => write!(f, "{tag} entry lacks the requested mode"),
            Self::MaskLacksMode(tag) => {
                write!(f, "{tag} entry is capped by a mask lacking the requested mode")
            }
            Self::GroupDenied(GroupDenial::OwningGroup) => {
                f.write_str("member of the owning group whose entry lacks the requested mode")
            }
            Self::GroupDenied(GroupDenial::NamedGroups) => {
                f.write_str("member of named groups whose entries all lack the requested mode")
            }
        }
    }
}
