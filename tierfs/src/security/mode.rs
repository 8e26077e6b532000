use core::{fmt, str::FromStr};

use thiserror::Error;

/// The nine `rwx` permission bits of a file or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u16);

impl Mode {
    pub const ALL: Mode = Mode(0o777);
    pub const NONE: Mode = Mode(0);
    /// Execute bits that directories get and files do not.
    pub const FILE_DIR_DIFF: Mode = Mode(0o111);

    /// Bits above `0o777` are dropped.
    pub const fn new(bits: u16) -> Self {
        Mode(bits & 0o777)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    pub const fn apply_umask(self, umask: Umask) -> Self {
        Mode(self.0 & !umask.0 .0)
    }

    pub const fn owner_bits(&self) -> u8 {
        ((self.0 >> 6) & 0o7) as u8
    }

    pub const fn group_bits(&self) -> u8 {
        ((self.0 >> 3) & 0o7) as u8
    }

    pub const fn other_bits(&self) -> u8 {
        (self.0 & 0o7) as u8
    }
}

impl fmt::Octal for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.0, f)
    }
}

/// `rwxr-xr-x` form.
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bits in [self.owner_bits(), self.group_bits(), self.other_bits()] {
            let r = if bits & 0o4 != 0 { 'r' } else { '-' };
            let w = if bits & 0o2 != 0 { 'w' } else { '-' };
            let x = if bits & 0o1 != 0 { 'x' } else { '-' };
            write!(f, "{r}{w}{x}")?;
        }
        Ok(())
    }
}

/// Mode bits cleared from newly created files and directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Umask(Mode);

impl Umask {
    pub const fn new(mode: Mode) -> Self {
        Umask(mode)
    }

    pub const fn mode(&self) -> Mode {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid umask `{0}`: expected at most four octal digits no greater than 0777")]
pub struct ParseUmaskError(String);

impl FromStr for Umask {
    type Err = ParseUmaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.len() > 4 {
            return Err(ParseUmaskError(s.to_string()));
        }
        match u16::from_str_radix(s, 8) {
            Ok(bits) if bits <= 0o777 => Ok(Umask(Mode(bits))),
            _ => Err(ParseUmaskError(s.to_string())),
        }
    }
}
