//! Decides whether POSIX.1e draft 17 access control lists grant an identity the requested access
//! to a path. The decision engine is pure and synchronous, obtaining the ACL of a path is left to
//! interchangeable [`resolvers`].

pub mod acl;
pub mod checker;
pub mod codec;
pub mod engine;
pub mod error;
pub mod resolvers;
pub mod version;

// Re-export some of our dependencies for QoL, implementors of custom resolvers need it
pub use async_trait;

pub mod prelude {
    pub use crate::acl::*;
    pub use crate::checker::AccessChecker;
    pub use crate::codec::parse_getfacl;
    pub use crate::engine::{access_check, evaluate, AccessDecision, DecisionReason};
    pub use crate::error::*;
    pub use crate::resolvers::*;
    pub use crate::version::*;
}
