use std::sync::atomic::AtomicU32;

/// Well-known IPC key every popup process uses to find the stacking segment.
///
/// The segment here is [`StackSegment::segment_size`] bytes. A smaller segment
/// left at the same key by another program (older notifiers that keep a bare
/// 4-byte offset use 8432 too) makes attaching fail with `InvalidInput` until
/// it is removed, e.g. with `ipcrm -M 8432`, or `[stack] key` is changed.
pub const DEFAULT_STACK_KEY: i32 = 8432;

/// The whole content of the stacking segment.
///
/// This struct lives in shared memory and is read and written by several
/// unrelated processes at once, so every field is atomic and the layout is
/// `#[repr(C)]`. A freshly created segment is all zeroes, which is a valid
/// "nothing stacked yet" state.
#[repr(C)]
#[derive(Debug, Default)]
pub struct StackSegment {
    /// Cumulative vertical offset claimed by popups that have not released yet.
    /// Kept as the first word of the segment.
    pub offset: AtomicU32,

    /// Number of claims currently held across all processes.
    pub live: AtomicU32,
}

impl StackSegment {
    /// Size in bytes requested from `shmget`.
    #[inline]
    pub const fn segment_size() -> usize {
        std::mem::size_of::<Self>()
    }
}
