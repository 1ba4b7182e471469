//! Interrupt-to-loop hand-off primitives
//!
//! Everything an interrupt (or a higher-priority task) shares with the main
//! loop goes through one of these types. They are lock-free, `const`
//! constructible so they can live in `static`s, and built on
//! `portable-atomic` so the same code runs on cores without native
//! read-modify-write atomics.
//!
//! - [`Flag`]: edge requests ("button pressed", "keepalive seen")
//! - [`Counter`]: counted requests ("three detents clockwise")
//! - [`Mailbox`]: single-slot, overwrite-on-full values ("latest targets")

use core::marker::PhantomData;

use portable_atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// One-shot request flag
pub struct Flag(AtomicBool);

impl Flag {
    /// Create a lowered flag
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Raise the flag (interrupt side)
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Lower the flag, returning whether it was raised (loop side)
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    /// Check the flag without lowering it
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}

/// Saturating event counter
pub struct Counter(AtomicU8);

impl Counter {
    /// Create a counter at zero
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    /// Record one event
    pub fn increment(&self) {
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(1));
    }

    /// Take all pending events, resetting the count
    pub fn take(&self) -> u8 {
        self.0.swap(0, Ordering::AcqRel)
    }

    /// Pending events
    pub fn pending(&self) -> u8 {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

/// Values that fit in one 32-bit mailbox slot
pub trait Packed: Copy {
    /// Pack into the slot representation
    fn pack(self) -> u32;

    /// Unpack from the slot representation
    fn unpack(raw: u32) -> Self;
}

/// Single-slot mailbox, last write wins
///
/// A writer never blocks and never fails: posting over an unread value
/// replaces it. A reader sees each posted value at most once, or the newest
/// one if several arrived in between.
pub struct Mailbox<T> {
    slot: AtomicU32,
    fresh: AtomicBool,
    _value: PhantomData<fn() -> T>,
}

impl<T: Packed> Mailbox<T> {
    /// Create an empty mailbox
    pub const fn new() -> Self {
        Self {
            slot: AtomicU32::new(0),
            fresh: AtomicBool::new(false),
            _value: PhantomData,
        }
    }

    /// Post a value, replacing any unread one
    pub fn post(&self, value: T) {
        self.slot.store(value.pack(), Ordering::Relaxed);
        self.fresh.store(true, Ordering::Release);
    }

    /// Take the newest unread value
    pub fn take(&self) -> Option<T> {
        if self.fresh.swap(false, Ordering::Acquire) {
            Some(T::unpack(self.slot.load(Ordering::Relaxed)))
        } else {
            None
        }
    }

    /// Returns true if an unread value is waiting
    pub fn has_pending(&self) -> bool {
        self.fresh.load(Ordering::Acquire)
    }
}

impl<T: Packed> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Packed for cluster_protocol::TurnSignal {
    fn pack(self) -> u32 {
        match self {
            Self::Off => 0,
            Self::Left => 1,
            Self::Right => 2,
        }
    }

    fn unpack(raw: u32) -> Self {
        match raw {
            1 => Self::Left,
            2 => Self::Right,
            _ => Self::Off,
        }
    }
}

impl Packed for cluster_protocol::Proximity {
    fn pack(self) -> u32 {
        self.is_warning() as u32
    }

    fn unpack(raw: u32) -> Self {
        if raw == 1 {
            Self::Warning
        } else {
            Self::Clear
        }
    }
}
