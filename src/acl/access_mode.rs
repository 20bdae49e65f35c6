use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::acl::permission_bits::{EXECUTE_BIT, READ_BIT, WRITE_BIT};
use crate::acl::PermissionBits;

/// The subset of read, write, and execute an operation asks to perform. A mode always has at
/// least one bit set, asking for "no access" is rejected when the mode is constructed so the
/// engine never has to consider it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct AccessMode(u8);

impl AccessMode {
    pub const ALL: Self = Self(READ_BIT | WRITE_BIT | EXECUTE_BIT);

    pub const EXECUTE: Self = Self(EXECUTE_BIT);

    pub const READ: Self = Self(READ_BIT);

    pub const WRITE: Self = Self(WRITE_BIT);

    pub const fn as_octal(&self) -> u8 {
        self.0
    }

    pub fn execute(&self) -> bool {
        self.0 & EXECUTE_BIT != 0
    }

    pub fn new(read: bool, write: bool, execute: bool) -> Result<Self, InvalidRequest> {
        Self::try_from(PermissionBits::new(read, write, execute))
    }

    pub fn read(&self) -> bool {
        self.0 & READ_BIT != 0
    }

    pub fn write(&self) -> bool {
        self.0 & WRITE_BIT != 0
    }
}

impl Display for AccessMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.read() {
            f.write_str("r")?;
        }

        if self.write() {
            f.write_str("w")?;
        }

        if self.execute() {
            f.write_str("x")?;
        }

        Ok(())
    }
}

impl From<AccessMode> for String {
    fn from(mode: AccessMode) -> Self {
        mode.to_string()
    }
}

impl FromStr for AccessMode {
    type Err = InvalidRequest;

    /// Accepts any combination of `r`, `w`, and `x` in any order. Repeated characters are
    /// tolerated, anything else is rejected.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut bits = 0;

        for ch in value.chars() {
            bits |= match ch {
                'r' => READ_BIT,
                'w' => WRITE_BIT,
                'x' => EXECUTE_BIT,
                other => return Err(InvalidRequest::UnknownMode(other)),
            };
        }

        if bits == 0 {
            return Err(InvalidRequest::EmptyMode);
        }

        Ok(Self(bits))
    }
}

impl TryFrom<PermissionBits> for AccessMode {
    type Error = InvalidRequest;

    fn try_from(bits: PermissionBits) -> Result<Self, Self::Error> {
        match bits.as_octal() {
            0 => Err(InvalidRequest::EmptyMode),
            digit => Ok(Self(digit)),
        }
    }
}

impl TryFrom<String> for AccessMode {
    type Error = InvalidRequest;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A caller asked for something the engine can't answer. These are contract violations rather
/// than access decisions and are raised before any ACL is consulted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidRequest {
    #[error("requested access mode must include at least one of read, write, or execute")]
    EmptyMode,

    #[error("unknown access mode character '{0}', expected any of 'r', 'w', 'x'")]
    UnknownMode(char),
}
