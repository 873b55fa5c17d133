//! Handle newtypes for host-owned resources

use core::fmt;

/// Identifier of a rigid body registered by the host physics world.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The reserved "no body" value.
    #[inline]
    pub const fn null() -> Self {
        Self(u64::MAX)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == u64::MAX
    }

    #[inline]
    pub const fn to_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "BodyId(null)")
        } else {
            write!(f, "BodyId({})", self.0)
        }
    }
}

/// Handle to a sound started through [`crate::ports::AudioOutput`].
///
/// A null handle is returned for unknown sources; passing it back into the
/// port is a no-op on the host side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AudioHandle(u64);

impl AudioHandle {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn null() -> Self {
        Self(u64::MAX)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == u64::MAX
    }

    #[inline]
    pub const fn to_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for AudioHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "AudioHandle(null)")
        } else {
            write!(f, "AudioHandle({})", self.0)
        }
    }
}
