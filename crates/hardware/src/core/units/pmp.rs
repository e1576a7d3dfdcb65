//! Physical Memory Protection (PMP).
//!
//! This module implements the static PMP layer that gates every instruction
//! fetch and data access of the core. It provides:
//! 1. **Entries:** Inclusive address ranges with R/W/X bits and an enable flag.
//! 2. **Table:** An ordered list where index 0 has the highest priority and
//!    the last entry is a deny-everything catch-all.
//! 3. **Checking:** A first-enabled-match-wins priority encoder. Later entries
//!    that also contain the address are never consulted. A multi-byte access
//!    is decided by the first enabled entry touching any of its bytes, and is
//!    denied unless that entry holds every byte.
//!
//! The table is fixed at start-up; nothing in the core reprograms it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::addr::{ADDR_MAX, Addr};
use crate::common::error::ConfigError;

/// Read/write/execute permission bits of a PMP entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permissions {
    /// Loads (and instruction fetches) may read the region.
    #[serde(default)]
    pub read: bool,
    /// Stores may write the region.
    #[serde(default)]
    pub write: bool,
    /// Instructions may be fetched from the region.
    #[serde(default)]
    pub execute: bool,
}

impl Permissions {
    /// No access at all.
    pub const NONE: Self = Self::new(false, false, false);
    /// Read-only data.
    pub const R: Self = Self::new(true, false, false);
    /// Read/write data.
    pub const RW: Self = Self::new(true, true, false);
    /// Read/execute (code).
    pub const RX: Self = Self::new(true, false, true);
    /// Everything.
    pub const RWX: Self = Self::new(true, true, true);

    /// Creates a permission set from individual bits.
    pub const fn new(read: bool, write: bool, execute: bool) -> Self {
        Self {
            read,
            write,
            execute,
        }
    }

    /// Returns true if no bit is set.
    pub const fn is_empty(self) -> bool {
        !self.read && !self.write && !self.execute
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            if self.read { 'r' } else { '-' },
            if self.write { 'w' } else { '-' },
            if self.execute { 'x' } else { '-' }
        )
    }
}

/// One protection region.
///
/// The range `[start, end]` is inclusive on both ends. In configuration files
/// the permission bits are written inline as `read`/`write`/`execute`, and
/// unknown keys are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryFields", into = "EntryFields")]
pub struct PermissionEntry {
    /// First address covered by the entry.
    pub start: Addr,
    /// Last address covered by the entry.
    pub end: Addr,
    /// Access rights granted inside the range.
    pub permissions: Permissions,
    /// Disabled entries never match.
    pub enabled: bool,
}

/// Serialized form of [`PermissionEntry`].
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryFields {
    start: Addr,
    end: Addr,
    #[serde(default)]
    read: bool,
    #[serde(default)]
    write: bool,
    #[serde(default)]
    execute: bool,
    #[serde(default = "EntryFields::default_enabled")]
    enabled: bool,
}

impl EntryFields {
    const fn default_enabled() -> bool {
        true
    }
}

impl From<EntryFields> for PermissionEntry {
    fn from(f: EntryFields) -> Self {
        Self {
            start: f.start,
            end: f.end,
            permissions: Permissions::new(f.read, f.write, f.execute),
            enabled: f.enabled,
        }
    }
}

impl From<PermissionEntry> for EntryFields {
    fn from(e: PermissionEntry) -> Self {
        Self {
            start: e.start,
            end: e.end,
            read: e.permissions.read,
            write: e.permissions.write,
            execute: e.permissions.execute,
            enabled: e.enabled,
        }
    }
}

impl PermissionEntry {
    /// Creates an enabled entry.
    pub const fn new(start: Addr, end: Addr, permissions: Permissions) -> Self {
        Self {
            start,
            end,
            permissions,
            enabled: true,
        }
    }

    /// Creates the deny-everything entry that covers the whole address space.
    pub const fn catch_all() -> Self {
        Self::new(0, ADDR_MAX, Permissions::NONE)
    }

    /// Returns a copy of this entry with the enable flag cleared.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Returns true if `addr` lies inside the inclusive range.
    #[inline]
    pub const fn contains(&self, addr: Addr) -> bool {
        self.start <= addr && addr <= self.end
    }

    /// Returns true if any address of `[first, last]` lies inside the range.
    #[inline]
    pub const fn overlaps(&self, first: Addr, last: Addr) -> bool {
        self.start <= last && first <= self.end
    }

    /// Returns true if the entry is enabled and spans every address.
    pub const fn is_catch_all(&self) -> bool {
        self.enabled && self.start == 0 && self.end == ADDR_MAX
    }

    /// Returns true if every flag asserted by `request` is granted.
    #[inline]
    pub const fn permits(&self, request: &AccessRequest) -> bool {
        (!request.read || self.permissions.read)
            && (!request.write || self.permissions.write)
            && (!request.execute || self.permissions.execute)
    }
}

impl fmt::Display for PermissionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:#010x}, {:#010x}] {}{}",
            self.start,
            self.end,
            self.permissions,
            if self.enabled { "" } else { " (disabled)" }
        )
    }
}

/// A permission query.
///
/// Any combination of flags may be asserted. A request with no flags asks for
/// nothing and is always granted. The request covers `size` bytes starting
/// at `address`; the constructors ask for a single byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccessRequest {
    /// First byte being accessed.
    pub address: Addr,
    /// Number of bytes accessed. Zero is treated as one.
    pub size: u32,
    /// Read access requested.
    pub read: bool,
    /// Write access requested.
    pub write: bool,
    /// Execute access requested.
    pub execute: bool,
}

impl AccessRequest {
    /// Instruction fetch: read and execute together.
    pub const fn fetch(address: Addr) -> Self {
        Self {
            address,
            size: 1,
            read: true,
            write: false,
            execute: true,
        }
    }

    /// Data load.
    pub const fn load(address: Addr) -> Self {
        Self {
            address,
            size: 1,
            read: true,
            write: false,
            execute: false,
        }
    }

    /// Data store.
    pub const fn store(address: Addr) -> Self {
        Self {
            address,
            size: 1,
            read: false,
            write: true,
            execute: false,
        }
    }

    /// No access this cycle.
    pub const fn none(address: Addr) -> Self {
        Self {
            address,
            size: 1,
            read: false,
            write: false,
            execute: false,
        }
    }

    /// Returns this request widened to `size` bytes.
    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Last byte of the access, or `None` if the span runs past the top of
    /// the address space.
    pub const fn last_address(&self) -> Option<Addr> {
        self.address.checked_add(self.size.saturating_sub(1))
    }

    /// Returns true if no access flag is asserted.
    pub const fn is_empty(&self) -> bool {
        !self.read && !self.write && !self.execute
    }

    /// Requested flags in `rwx` notation.
    pub fn flags(&self) -> Permissions {
        Permissions::new(self.read, self.write, self.execute)
    }
}

/// Outcome of a permission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// The access may proceed.
    Granted,
    /// The access is refused.
    Denied,
}

impl AccessDecision {
    /// Returns true for [`AccessDecision::Granted`].
    #[inline]
    pub const fn granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    #[inline]
    const fn from_bool(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// Raw result of matching a request against the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PmpResult {
    /// Entry `index` matched and grants the request.
    Allow(usize),
    /// Entry `index` matched and either refuses at least one requested flag
    /// or holds only part of the access.
    Deny(usize),
    /// No enabled entry touches the access.
    NoMatch,
}

impl PmpResult {
    /// Collapses the match into a decision. `NoMatch` is a denial.
    #[inline]
    pub const fn decision(self) -> AccessDecision {
        AccessDecision::from_bool(matches!(self, Self::Allow(_)))
    }

    /// Index of the matching entry, if any.
    pub const fn entry(self) -> Option<usize> {
        match self {
            Self::Allow(i) | Self::Deny(i) => Some(i),
            Self::NoMatch => None,
        }
    }
}

/// Ordered PMP entries; index 0 has the highest priority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermissionTable {
    entries: Vec<PermissionEntry>,
}

impl PermissionTable {
    /// Builds a validated table.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::EmptyTable`] if `entries` is empty.
    /// * [`ConfigError::InvalidRange`] if any entry has `start > end`.
    /// * [`ConfigError::MissingCatchAll`] if the last entry is not an enabled
    ///   full-range entry.
    /// * [`ConfigError::PermissiveCatchAll`] if that entry grants anything.
    pub fn new(entries: Vec<PermissionEntry>) -> Result<Self, ConfigError> {
        let Some(last) = entries.last() else {
            return Err(ConfigError::EmptyTable);
        };
        if let Some((index, e)) = entries.iter().enumerate().find(|(_, e)| e.start > e.end) {
            return Err(ConfigError::InvalidRange {
                index,
                start: e.start,
                end: e.end,
            });
        }
        if !last.is_catch_all() {
            return Err(ConfigError::MissingCatchAll);
        }
        if !last.permissions.is_empty() {
            return Err(ConfigError::PermissiveCatchAll {
                index: entries.len() - 1,
            });
        }
        Ok(Self { entries })
    }

    /// Builds a table without validation.
    ///
    /// Lookups still deny addresses that no entry covers.
    pub fn unchecked(entries: Vec<PermissionEntry>) -> Self {
        Self { entries }
    }

    /// The reference layout: RWX code/data at `[0x00, 0x3F]`, RX at
    /// `[0x40, 0x7F]`, nothing at `[0x80, 0xBF]`, and the catch-all.
    pub fn reference() -> Self {
        Self {
            entries: vec![
                PermissionEntry::new(0x00, 0x3F, Permissions::RWX),
                PermissionEntry::new(0x40, 0x7F, Permissions::RX),
                PermissionEntry::new(0x80, 0xBF, Permissions::NONE),
                PermissionEntry::catch_all(),
            ],
        }
    }

    /// Entries in priority order.
    pub fn entries(&self) -> &[PermissionEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the highest-priority enabled entry containing `addr`.
    #[inline]
    pub fn matching_entry(&self, addr: Addr) -> Option<(usize, &PermissionEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.enabled && e.contains(addr))
    }

    /// Matches `request` against the table.
    ///
    /// The first enabled entry touching any byte of the request decides. It
    /// must contain every byte and grant every flag. A span that wraps past
    /// the top of the address space never matches.
    pub fn lookup(&self, request: &AccessRequest) -> PmpResult {
        let Some(last) = request.last_address() else {
            return PmpResult::NoMatch;
        };
        let first = self
            .entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.enabled && e.overlaps(request.address, last));
        match first {
            Some((i, entry))
                if entry.contains(request.address)
                    && entry.contains(last)
                    && entry.permits(request) =>
            {
                PmpResult::Allow(i)
            }
            Some((i, _)) => PmpResult::Deny(i),
            None => PmpResult::NoMatch,
        }
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Physical Memory Protection unit.
///
/// Wraps the read-only [`PermissionTable`] and reports denials through
/// `tracing`. The cycle of a denial is carried by the caller's `tick` span.
#[derive(Clone, Debug, Default)]
pub struct Pmp {
    table: PermissionTable,
}

impl Pmp {
    /// Creates a PMP unit over `table`.
    pub fn new(table: PermissionTable) -> Self {
        Self { table }
    }

    /// The underlying table.
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Raw match of `request` without logging.
    pub fn lookup(&self, request: &AccessRequest) -> PmpResult {
        self.table.lookup(request)
    }

    /// Checks whether `request` is permitted.
    ///
    /// Never fails; a missing match is a denial and a request with no flags
    /// is always granted. Each denial emits a `warn` event with the address,
    /// requested flags and matched entry.
    pub fn check(&self, request: &AccessRequest) -> AccessDecision {
        if request.is_empty() {
            return AccessDecision::Granted;
        }
        let result = self.table.lookup(request);
        let decision = result.decision();
        if !decision.granted() {
            let requested = request.flags();
            match result.entry() {
                Some(entry) => tracing::warn!(
                    address = request.address,
                    size = request.size,
                    %requested,
                    entry,
                    "PMP denied access at {:#010x}",
                    request.address
                ),
                None => tracing::warn!(
                    address = request.address,
                    size = request.size,
                    %requested,
                    "PMP denied access at {:#010x}: no matching entry",
                    request.address
                ),
            }
        }
        decision
    }
}
