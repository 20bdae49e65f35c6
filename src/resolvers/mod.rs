#[cfg(feature = "getfacl")]
mod getfacl_resolver;
mod memory_resolver;
#[cfg(unix)]
mod mode_resolver;
mod traits;

#[cfg(feature = "getfacl")]
pub use getfacl_resolver::{GetfaclResolver, DEFAULT_GETFACL_BINARY};
pub use memory_resolver::MemoryResolver;
#[cfg(unix)]
pub use mode_resolver::ModeResolver;
pub use traits::{PermissionResolver, ResolutionError};
