use std::fmt::{self, Display, Formatter};

use crate::acl::InvalidRequest;
use crate::codec::GetfaclParseError;
use crate::resolvers::ResolutionError;

#[derive(Debug)]
pub struct AclCheckError(String);

impl From<&'static str> for AclCheckError {
    fn from(val: &'static str) -> Self {
        Self(val.to_string())
    }
}

impl From<String> for AclCheckError {
    fn from(val: String) -> Self {
        Self(val)
    }
}

impl From<GetfaclParseError> for AclCheckError {
    fn from(error: GetfaclParseError) -> Self {
        Self(error.to_string())
    }
}

impl From<InvalidRequest> for AclCheckError {
    fn from(error: InvalidRequest) -> Self {
        Self(format!("invalid request: {error}"))
    }
}

impl From<ResolutionError> for AclCheckError {
    fn from(error: ResolutionError) -> Self {
        Self(format!("unable to resolve permissions: {error}"))
    }
}

impl Display for AclCheckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for AclCheckError {}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for AclCheckError {
    fn from(error: serde_json::Error) -> Self {
        Self(error.to_string())
    }
}

pub type AclCheckResult<T> = Result<T, AclCheckError>;
