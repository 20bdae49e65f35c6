use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::acl::AccessMode;

pub(crate) const READ_BIT: u8 = 0b0000_0100;

pub(crate) const WRITE_BIT: u8 = 0b0000_0010;

pub(crate) const EXECUTE_BIT: u8 = 0b0000_0001;

/// The read/write/execute triple carried by every ACL entry. All eight combinations are valid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PermissionBits {
    read: bool,
    write: bool,
    execute: bool,
}

impl PermissionBits {
    pub const ALL: Self = Self::new(true, true, true);

    pub const NONE: Self = Self::new(false, false, false);

    /// Returns the 3-bit octal digit for this triple, the same value used for one position of a
    /// classic `rwxrwxrwx` mode.
    pub const fn as_octal(&self) -> u8 {
        let mut digit = 0;

        if self.read {
            digit |= READ_BIT;
        }

        if self.write {
            digit |= WRITE_BIT;
        }

        if self.execute {
            digit |= EXECUTE_BIT;
        }

        digit
    }

    /// True when at least one of the requested bits is present. This is the atomic primitive the
    /// authorization step is built from, a request for `rw` is satisfied by an `r--` entry.
    pub fn contains_any(&self, mode: AccessMode) -> bool {
        self.as_octal() & mode.as_octal() != 0
    }

    pub fn execute(&self) -> bool {
        self.execute
    }

    pub const fn new(read: bool, write: bool, execute: bool) -> Self {
        Self {
            read,
            write,
            execute,
        }
    }

    pub fn read(&self) -> bool {
        self.read
    }

    pub fn write(&self) -> bool {
        self.write
    }
}

impl Display for PermissionBits {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let read = if self.read { 'r' } else { '-' };
        let write = if self.write { 'w' } else { '-' };
        let execute = if self.execute { 'x' } else { '-' };

        write!(f, "{read}{write}{execute}")
    }
}

impl From<u8> for PermissionBits {
    fn from(value: u8) -> Self {
        Self {
            read: value & READ_BIT != 0,
            write: value & WRITE_BIT != 0,
            execute: value & EXECUTE_BIT != 0,
        }
    }
}

impl FromStr for PermissionBits {
    type Err = PermissionBitsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() != 3 {
            return Err(PermissionBitsError::InvalidLength(chars.len()));
        }

        let read = match chars[0] {
            'r' => true,
            '-' => false,
            other => return Err(PermissionBitsError::UnexpectedCharacter(other, 0)),
        };

        let write = match chars[1] {
            'w' => true,
            '-' => false,
            other => return Err(PermissionBitsError::UnexpectedCharacter(other, 1)),
        };

        let execute = match chars[2] {
            'x' => true,
            '-' => false,
            other => return Err(PermissionBitsError::UnexpectedCharacter(other, 2)),
        };

        Ok(Self::new(read, write, execute))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PermissionBitsError {
    #[error("permission strings are exactly three characters long, got {0}")]
    InvalidLength(usize),

    #[error("unexpected character '{0}' at position {1} of permission string")]
    UnexpectedCharacter(char, usize),
}
