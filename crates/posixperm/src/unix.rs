//! Conversion between [`Perm`] and the Unix `st_mode` layout.
//!
//! `st_mode` packs the file type into a 4-bit field (`S_IFMT`) and keeps
//! set-user-id, set-group-id and sticky just above the permission bits.
//! [`Perm`] uses one flag per property instead, so the mapping is:
//!
//! | `st_mode` | [`ModeBits`] |
//! |-----------|--------------|
//! | `S_IFDIR` | `DIR` |
//! | `S_IFLNK` | `SYMLINK` |
//! | `S_IFIFO` | `NAMED_PIPE` |
//! | `S_IFSOCK` | `SOCKET` |
//! | `S_IFBLK` | `DEVICE` |
//! | `S_IFCHR` | `DEVICE \| CHAR_DEVICE` |
//! | `S_IFREG` | (none) |
//! | `S_ISUID` / `S_ISGID` / `S_ISVTX` | `SETUID` / `SETGID` / `STICKY` |
//!
//! Flags with no `st_mode` counterpart (`APPEND`, `EXCLUSIVE`,
//! `TEMPORARY`, `IRREGULAR`) are dropped by [`Perm::to_unix_mode`].

use crate::{ModeBits, Perm, PermBits};

/// `st_mode` constants shared by Linux, the BSDs and macOS.
pub mod consts {
    pub const S_IFMT: u32 = 0o170_000;
    pub const S_IFSOCK: u32 = 0o140_000;
    pub const S_IFLNK: u32 = 0o120_000;
    pub const S_IFREG: u32 = 0o100_000;
    pub const S_IFBLK: u32 = 0o060_000;
    pub const S_IFDIR: u32 = 0o040_000;
    pub const S_IFCHR: u32 = 0o020_000;
    pub const S_IFIFO: u32 = 0o010_000;
    pub const S_ISUID: u32 = 0o004_000;
    pub const S_ISGID: u32 = 0o002_000;
    pub const S_ISVTX: u32 = 0o001_000;
}

use consts::*;

const SPECIAL: [(u32, ModeBits); 3] = [
    (S_ISUID, ModeBits::SETUID),
    (S_ISGID, ModeBits::SETGID),
    (S_ISVTX, ModeBits::STICKY),
];

fn type_from_unix(file_type: u32) -> ModeBits {
    match file_type {
        S_IFDIR => ModeBits::DIR,
        S_IFLNK => ModeBits::SYMLINK,
        S_IFIFO => ModeBits::NAMED_PIPE,
        S_IFSOCK => ModeBits::SOCKET,
        S_IFBLK => ModeBits::DEVICE,
        S_IFCHR => ModeBits::DEVICE.union(ModeBits::CHAR_DEVICE),
        _ => ModeBits::empty(),
    }
}

fn type_to_unix(mode: ModeBits) -> u32 {
    if mode.contains(ModeBits::DIR) {
        S_IFDIR
    } else if mode.contains(ModeBits::SYMLINK) {
        S_IFLNK
    } else if mode.contains(ModeBits::NAMED_PIPE) {
        S_IFIFO
    } else if mode.contains(ModeBits::SOCKET) {
        S_IFSOCK
    } else if mode.contains(ModeBits::CHAR_DEVICE) {
        S_IFCHR
    } else if mode.contains(ModeBits::DEVICE) {
        S_IFBLK
    } else {
        0
    }
}

impl Perm {
    /// Converts a Unix `st_mode` value.
    ///
    /// Regular files carry no type flag. Unknown `S_IFMT` values are
    /// treated the same way.
    ///
    /// ```
    /// use posixperm::Perm;
    ///
    /// let p = Perm::from_unix_mode(0o040_755);
    /// assert_eq!(p.to_string(), "drwxr-xr-x");
    /// ```
    #[must_use]
    pub fn from_unix_mode(st_mode: u32) -> Self {
        let special = SPECIAL
            .iter()
            .filter(|(bit, _)| st_mode & bit != 0)
            .fold(ModeBits::empty(), |acc, (_, flag)| acc | *flag);
        let mode = type_from_unix(st_mode & S_IFMT) | special;
        Self::new(mode, PermBits::from_bits_truncate(st_mode))
    }

    /// Converts to a Unix `st_mode` value.
    ///
    /// Values without a type flag produce no `S_IFMT` bits, which is what
    /// `chmod(2)` expects.
    #[must_use]
    pub fn to_unix_mode(self) -> u32 {
        let mode = self.mode();
        let special = SPECIAL
            .iter()
            .filter(|(_, flag)| mode.contains(*flag))
            .fold(0, |acc, (bit, _)| acc | bit);
        type_to_unix(mode) | special | self.permissions().bits()
    }

    /// Converts to [`std::fs::Permissions`].
    #[cfg(unix)]
    #[must_use]
    pub fn to_permissions(self) -> std::fs::Permissions {
        use std::os::unix::fs::PermissionsExt;
        std::fs::Permissions::from_mode(self.to_unix_mode())
    }
}

#[cfg(unix)]
impl From<std::fs::Permissions> for Perm {
    fn from(permissions: std::fs::Permissions) -> Self {
        use std::os::unix::fs::PermissionsExt;
        Self::from_unix_mode(permissions.mode())
    }
}
