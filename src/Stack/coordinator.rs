use crate::Core::SharedMemory::{create_shared_memory, remove_shared_memory, SharedMemoryBackend};
use crate::Stack::layout::StackSegment;
use serde::Deserialize;
use std::io;
use std::sync::atomic::Ordering;

/// How a releasing instance decides that it is the last one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleasePolicy {
    /// Remove the segment when the shared offset still equals the value this
    /// instance produced, i.e. nobody claimed space after it. This is a value
    /// comparison, not a reference count: an instance that claimed later but
    /// already exited leaves the segment in place until the next fresh claim
    /// sequence overwrites it.
    #[default]
    LastClaimant,
    /// Remove the segment when the number of live claims drops to zero.
    LiveCount,
}

/// One instance's reservation of a vertical slot.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InstanceClaim {
    /// Shared offset observed when the claim was made.
    pub before: u32,
    /// Shared offset after this instance added its extent.
    pub after: u32,
}

impl InstanceClaim {
    /// Vertical offset this popup stacks at, relative to the base position.
    pub fn offset(&self) -> u32 {
        self.before
    }

    /// Value compared against the shared offset at release time.
    pub fn token(&self) -> u32 {
        self.after
    }

    pub fn extent(&self) -> u32 {
        self.after.wrapping_sub(self.before)
    }
}

/// Cross-process allocator of vertical popup offsets.
///
/// Every running popup attaches to the same fixed-key segment, claims
/// `height + gap` pixels of stacking space with a single atomic fetch-and-add,
/// and gives the space back when it exits.
pub struct StackCoordinator {
    shm: Box<dyn SharedMemoryBackend>,
    segment: *const StackSegment,
    key: i32,
    gap: u32,
    policy: ReleasePolicy,
    claim: Option<InstanceClaim>,
}

impl StackCoordinator {
    /// Attach to (creating if absent) the stacking segment stored under `key`.
    pub fn attach(key: i32, gap: u32, policy: ReleasePolicy) -> io::Result<Self> {
        let size = StackSegment::segment_size();
        let shm = create_shared_memory(key, size).map_err(|e| {
            // shmget reports EINVAL when the existing segment is smaller than asked for
            let (branch, hint) = if e.kind() == io::ErrorKind::InvalidInput {
                (
                    "├─",
                    "\n╰─ Hint: an incompatible, smaller segment already uses this key; \
                     remove it with ipcrm or configure another [stack] key",
                )
            } else {
                ("╰─", "")
            };
            io::Error::new(
                e.kind(),
                format!(
                    "Failed to attach stacking segment:\n\
                    ├─ Key:  {key:#x}\n\
                    ├─ Size: {size}\n\
                    {branch} Error: {e}{hint}"
                ),
            )
        })?;

        let segment = shm.as_ptr() as *const StackSegment;
        if (segment as usize) % std::mem::align_of::<StackSegment>() != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Shared memory not properly aligned",
            ));
        }

        tracing::debug!(key, policy = ?policy, "attached to stacking segment");

        Ok(Self {
            shm,
            segment,
            key,
            gap,
            policy,
            claim: None,
        })
    }

    #[inline]
    fn segment(&self) -> &StackSegment {
        // Safety: the attachment stays mapped for as long as `self.shm` lives.
        unsafe { &*self.segment }
    }

    /// Claim `height + gap` pixels of stacking space.
    ///
    /// The returned claim's `offset()` is where this popup goes relative to the
    /// configured base position. An instance holds at most one claim.
    pub fn claim(&mut self, height: u32) -> io::Result<InstanceClaim> {
        if self.claim.is_some() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "This instance already holds a stacking claim",
            ));
        }

        let extent = height.saturating_add(self.gap);
        let segment = self.segment();
        segment.live.fetch_add(1, Ordering::AcqRel);
        let before = segment.offset.fetch_add(extent, Ordering::AcqRel);
        let claim = InstanceClaim {
            before,
            after: before.wrapping_add(extent),
        };

        tracing::debug!(before, after = claim.after, extent, "claimed stacking slot");
        self.claim = Some(claim);
        Ok(claim)
    }

    /// Give the held claim back.
    ///
    /// Returns `true` when this instance was judged the last one out and the
    /// segment was removed, `false` when the segment was left for instances
    /// still on screen (or when no claim was held).
    pub fn release(&mut self) -> io::Result<bool> {
        let Some(claim) = self.claim.take() else {
            return Ok(false);
        };

        let segment = self.segment();
        let remaining = segment
            .live
            .fetch_sub(1, Ordering::AcqRel)
            .saturating_sub(1);
        let current = segment.offset.load(Ordering::Acquire);

        let last_out = match self.policy {
            ReleasePolicy::LastClaimant => current == claim.token(),
            ReleasePolicy::LiveCount => remaining == 0,
        };

        tracing::debug!(
            token = claim.token(),
            current,
            remaining,
            last_out,
            "releasing stacking slot"
        );

        if last_out {
            remove_shared_memory(self.shm.raw_handle())?;
        }
        Ok(last_out)
    }

    /// Current cumulative offset in the shared segment.
    pub fn current_offset(&self) -> u32 {
        self.segment().offset.load(Ordering::Acquire)
    }

    /// Number of claims currently held across all attached processes.
    pub fn live_claims(&self) -> u32 {
        self.segment().live.load(Ordering::Acquire)
    }

    pub fn held_claim(&self) -> Option<InstanceClaim> {
        self.claim
    }

    pub fn key(&self) -> i32 {
        self.key
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn policy(&self) -> ReleasePolicy {
        self.policy
    }
}

impl Drop for StackCoordinator {
    fn drop(&mut self) {
        if self.claim.is_some() {
            if let Err(e) = self.release() {
                tracing::warn!(error = %e, "failed to release stacking claim");
            }
        }
    }
}

// The segment pointer is only dereferenced through atomics.
unsafe impl Send for StackCoordinator {}
unsafe impl Sync for StackCoordinator {}
