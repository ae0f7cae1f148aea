use crate::Stack::{InstanceClaim, StackCoordinator};
use std::fmt;

/// Debug function for StackCoordinator
///
/// Shows:
/// - Segment key (hex)
/// - Release policy and gap
/// - The claim held by this instance, if any
/// - A live snapshot of the shared offset and claim count
pub fn debug_stack_coordinator(
    coordinator: &StackCoordinator,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    f.debug_struct("StackCoordinator")
        .field("shm", &"<opaque>")
        .field("key", &format_args!("{:#x}", coordinator.key()))
        .field("policy", &coordinator.policy())
        .field("gap", &coordinator.gap())
        .field("claim", &coordinator.held_claim())
        .field("shared_offset", &coordinator.current_offset())
        .field("live_claims", &coordinator.live_claims())
        .finish()
}

/// Debug function for InstanceClaim
///
/// Renders the before/after pair as a half-open range.
pub fn debug_instance_claim(claim: &InstanceClaim, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("InstanceClaim")
        .field(&format_args!("{}..{}", claim.before, claim.after))
        .finish()
}
