//! Named bit sets for the two halves of a [`Perm`](crate::Perm) value.
//!
//! # Layout
//!
//! ```text
//!  31                19 18          9 8     0
//! ┌────────────────────┬─────────────┬───────┐
//! │ ModeBits (13 flags)│   unused    │ rwx×3 │
//! └────────────────────┴─────────────┴───────┘
//! ```
//!
//! The low nine bits are [`PermBits`]: three `rwx` nibbles, owner first.
//! The high bits are [`ModeBits`]: one flag per file type or special
//! behavior, each bound to a single-character abbreviation.
//!
//! [`MODE_ABBREVIATIONS`] and [`PERM_COLUMNS`] are the only places those
//! characters are defined. The decoders and the canonical encoder both
//! read them, so text produced by one is always accepted by the other.

use bitflags::bitflags;

bitflags! {
    /// Read/write/execute bits for owner, group and other.
    ///
    /// Besides the nine single-bit flags there are two families of
    /// multi-bit masks:
    ///
    /// | Mask | Bits | Meaning |
    /// |------|------|---------|
    /// | [`OWNER`](Self::OWNER) / [`GROUP`](Self::GROUP) / [`OTHER`](Self::OTHER) | `0o700` / `0o070` / `0o007` | every bit of one actor |
    /// | [`READ`](Self::READ) / [`WRITE`](Self::WRITE) / [`EXEC`](Self::EXEC) | `0o444` / `0o222` / `0o111` | one column across all actors |
    ///
    /// Intersecting an actor mask with a column mask selects a single bit:
    ///
    /// ```
    /// use posixperm::PermBits;
    ///
    /// assert_eq!(PermBits::GROUP & PermBits::WRITE, PermBits::GROUP_WRITE);
    /// assert_eq!((PermBits::OWNER | PermBits::OTHER) & PermBits::READ,
    ///            PermBits::OWNER_READ | PermBits::OTHER_READ);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct PermBits: u32 {
        const OWNER_READ  = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC  = 0o100;
        const GROUP_READ  = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC  = 0o010;
        const OTHER_READ  = 0o004;
        const OTHER_WRITE = 0o002;
        const OTHER_EXEC  = 0o001;

        const OWNER = 0o700;
        const GROUP = 0o070;
        const OTHER = 0o007;
        const ALL   = 0o777;

        const READ  = 0o444;
        const WRITE = 0o222;
        const EXEC  = 0o111;
    }
}

bitflags! {
    /// File type and special mode flags.
    ///
    /// Each flag occupies one bit counting down from bit 31, in the same
    /// order as [`MODE_ABBREVIATIONS`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ModeBits: u32 {
        /// `d`: directory
        const DIR         = 1 << 31;
        /// `a`: append-only
        const APPEND      = 1 << 30;
        /// `l`: exclusive use
        const EXCLUSIVE   = 1 << 29;
        /// `T`: temporary file
        const TEMPORARY   = 1 << 28;
        /// `L`: symbolic link
        const SYMLINK     = 1 << 27;
        /// `D`: device file
        const DEVICE      = 1 << 26;
        /// `p`: named pipe (FIFO)
        const NAMED_PIPE  = 1 << 25;
        /// `S`: Unix domain socket
        const SOCKET      = 1 << 24;
        /// `u`: set-user-id
        const SETUID      = 1 << 23;
        /// `g`: set-group-id
        const SETGID      = 1 << 22;
        /// `c`: character device (set together with `DEVICE`)
        const CHAR_DEVICE = 1 << 21;
        /// `t`: sticky
        const STICKY      = 1 << 20;
        /// `?`: non-regular file of unknown kind
        const IRREGULAR   = 1 << 19;

        /// Flags describing what kind of file this is, as opposed to how it behaves.
        const TYPE = Self::DIR.bits()
            | Self::SYMLINK.bits()
            | Self::NAMED_PIPE.bits()
            | Self::SOCKET.bits()
            | Self::DEVICE.bits()
            | Self::CHAR_DEVICE.bits()
            | Self::IRREGULAR.bits();
    }
}

/// Abbreviation for every [`ModeBits`] flag, in canonical output order.
pub const MODE_ABBREVIATIONS: [(ModeBits, char); 13] = [
    (ModeBits::DIR, 'd'),
    (ModeBits::APPEND, 'a'),
    (ModeBits::EXCLUSIVE, 'l'),
    (ModeBits::TEMPORARY, 'T'),
    (ModeBits::SYMLINK, 'L'),
    (ModeBits::DEVICE, 'D'),
    (ModeBits::NAMED_PIPE, 'p'),
    (ModeBits::SOCKET, 'S'),
    (ModeBits::SETUID, 'u'),
    (ModeBits::SETGID, 'g'),
    (ModeBits::CHAR_DEVICE, 'c'),
    (ModeBits::STICKY, 't'),
    (ModeBits::IRREGULAR, '?'),
];

/// Letter for every [`PermBits`] position, in `ls` column order.
pub const PERM_COLUMNS: [(PermBits, char); 9] = [
    (PermBits::OWNER_READ, 'r'),
    (PermBits::OWNER_WRITE, 'w'),
    (PermBits::OWNER_EXEC, 'x'),
    (PermBits::GROUP_READ, 'r'),
    (PermBits::GROUP_WRITE, 'w'),
    (PermBits::GROUP_EXEC, 'x'),
    (PermBits::OTHER_READ, 'r'),
    (PermBits::OTHER_WRITE, 'w'),
    (PermBits::OTHER_EXEC, 'x'),
];

impl PermBits {
    /// Mask for a single actor letter (`u`, `g`, `o`) or `a` for all three.
    #[must_use]
    pub fn from_actor(c: char) -> Option<Self> {
        match c {
            'u' => Some(Self::OWNER),
            'g' => Some(Self::GROUP),
            'o' => Some(Self::OTHER),
            'a' => Some(Self::ALL),
            _ => None,
        }
    }

    /// Column mask for a permission letter (`r`, `w`, `x`).
    #[must_use]
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'r' => Some(Self::READ),
            'w' => Some(Self::WRITE),
            'x' => Some(Self::EXEC),
            _ => None,
        }
    }
}

impl ModeBits {
    /// Looks up the flag bound to an abbreviation character.
    ///
    /// ```
    /// use posixperm::ModeBits;
    ///
    /// assert_eq!(ModeBits::from_abbreviation('d'), Some(ModeBits::DIR));
    /// assert_eq!(ModeBits::from_abbreviation('-'), None);
    /// ```
    #[must_use]
    pub fn from_abbreviation(c: char) -> Option<Self> {
        MODE_ABBREVIATIONS
            .iter()
            .find(|(_, abbrev)| *abbrev == c)
            .map(|(flag, _)| *flag)
    }

    /// Returns the abbreviation of a single flag, or `None` for composite
    /// or empty values.
    #[must_use]
    pub fn abbreviation(self) -> Option<char> {
        MODE_ABBREVIATIONS
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, abbrev)| *abbrev)
    }

    /// Abbreviations of every set flag, in canonical order.
    #[must_use]
    pub fn abbreviations(self) -> String {
        MODE_ABBREVIATIONS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, abbrev)| *abbrev)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perm_columns_cover_all_nine_bits() {
        let all = PERM_COLUMNS
            .iter()
            .fold(PermBits::empty(), |acc, (bit, _)| acc | *bit);
        assert_eq!(all, PermBits::ALL);
    }

    #[test]
    fn perm_columns_are_descending() {
        for pair in PERM_COLUMNS.windows(2) {
            assert!(pair[0].0.bits() > pair[1].0.bits());
        }
    }

    #[test]
    fn mode_abbreviations_count_down_from_bit_31() {
        for (i, (flag, _)) in MODE_ABBREVIATIONS.iter().enumerate() {
            assert_eq!(flag.bits(), 1 << (31 - i), "flag #{i} out of place");
        }
    }

    #[test]
    fn mode_abbreviations_are_unique_and_avoid_listing_letters() {
        for (i, (_, a)) in MODE_ABBREVIATIONS.iter().enumerate() {
            assert!(!matches!(a, 'r' | 'w' | 'x' | '-'), "{a} collides with ls columns");
            for (_, b) in &MODE_ABBREVIATIONS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn mode_bits_do_not_overlap_perm_bits() {
        assert_eq!(ModeBits::all().bits() & PermBits::all().bits(), 0);
    }

    #[test]
    fn actor_and_column_intersection() {
        assert_eq!(PermBits::OWNER & PermBits::READ, PermBits::OWNER_READ);
        assert_eq!(PermBits::OTHER & PermBits::EXEC, PermBits::OTHER_EXEC);
        assert_eq!(PermBits::ALL & PermBits::WRITE, PermBits::WRITE);
    }

    #[test]
    fn from_actor_and_letter() {
        assert_eq!(PermBits::from_actor('u'), Some(PermBits::OWNER));
        assert_eq!(PermBits::from_actor('a'), Some(PermBits::ALL));
        assert_eq!(PermBits::from_actor('m'), None);
        assert_eq!(PermBits::from_letter('x'), Some(PermBits::EXEC));
        assert_eq!(PermBits::from_letter('X'), None);
    }

    #[test]
    fn abbreviation_lookup_both_ways() {
        for (flag, abbrev) in MODE_ABBREVIATIONS {
            assert_eq!(ModeBits::from_abbreviation(abbrev), Some(flag));
            assert_eq!(flag.abbreviation(), Some(abbrev));
        }
        assert_eq!((ModeBits::DIR | ModeBits::STICKY).abbreviation(), None);
        assert_eq!(ModeBits::empty().abbreviation(), None);
    }

    #[test]
    fn abbreviations_follow_canonical_order() {
        let bits = ModeBits::STICKY | ModeBits::DIR | ModeBits::SETGID;
        assert_eq!(bits.abbreviations(), "dgt");
        assert_eq!(ModeBits::empty().abbreviations(), "");
    }

    #[test]
    fn type_mask_excludes_behavior_flags() {
        assert!(ModeBits::TYPE.contains(ModeBits::DIR));
        assert!(ModeBits::TYPE.contains(ModeBits::CHAR_DEVICE));
        assert!(!ModeBits::TYPE.contains(ModeBits::SETUID));
        assert!(!ModeBits::TYPE.contains(ModeBits::APPEND));
    }
}
