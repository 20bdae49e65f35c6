//! # Access-Check Engine
//!
//! Implements the access check algorithm of POSIX 1003.1e draft 17. The decision happens in two
//! steps:
//!
//! 1. [`select_entry`] picks the one ACL entry that most closely matches the requesting identity,
//!    looking at owner, named users, (owning or named) groups, and finally other in that order.
//! 2. [`authorize`] checks the selected entry contains the requested permissions, additionally
//!    capped by the mask when the entry belongs to the group class.
//!
//! A group match whose entry lacks the requested permissions short circuits to a denial, it is
//! never allowed to fall through to the (possibly more permissive) other entry.
//!
//! Everything here is a pure function of its inputs. There is no shared state so checks can run
//! concurrently without any coordination.

mod decision;
mod selection;

pub use decision::{AccessDecision, DecisionReason};
pub use selection::{select_entry, GroupDenial, Selection};

use crate::acl::{contains_permissions, AccessMode, Identity, PermissionBits, PermissionSet};

/// Returns true when the identity is allowed the requested mode on the object described by the
/// permission set.
pub fn access_check(identity: &Identity, permissions: &PermissionSet, mode: AccessMode) -> bool {
    evaluate(identity, permissions, mode).is_granted()
}

/// Decides access for an already selected entry.
///
/// Owner and other selections only need to contain the requested mode themselves. Named users,
/// the owning group, and named groups also need the mask to contain it. When the ACL has no mask
/// entry at all (a minimal ACL) nothing caps the group class.
pub fn authorize(
    selection: Selection,
    mask: Option<PermissionBits>,
    mode: AccessMode,
) -> AccessDecision {
    let (tag, bits) = match selection.entry() {
        Ok(entry) => entry,
        Err(denial) => return AccessDecision::new(DecisionReason::GroupDenied(denial)),
    };

    if !contains_permissions(bits, mode) {
        return AccessDecision::new(DecisionReason::EntryLacksMode(tag));
    }

    if tag.is_mask_capped() {
        if let Some(mask) = mask {
            if !contains_permissions(mask, mode) {
                return AccessDecision::new(DecisionReason::MaskLacksMode(tag));
            }
        }
    }

    AccessDecision::new(DecisionReason::Granted(tag))
}

/// Runs both steps of the access check against the access entries of the permission set and
/// reports the rule that produced the decision. Default entries never take part.
pub fn evaluate(
    identity: &Identity,
    permissions: &PermissionSet,
    mode: AccessMode,
) -> AccessDecision {
    let entries = permissions.access();

    let duplicates = entries.duplicate_qualifiers();
    if !duplicates.is_empty() {
        tracing::warn!(
            ?duplicates,
            "acl contains duplicate qualifiers, first entry in collection order is used"
        );
    }

    let selection = select_entry(identity, entries, mode);
    let decision = authorize(selection, entries.mask(), mode);

    tracing::trace!(
        user = identity.name(),
        %mode,
        ?selection,
        granted = decision.is_granted(),
        "engine::evaluate"
    );

    decision
}
