use super::coordinator::{InstanceClaim, StackCoordinator};
use std::fmt;

// Debug proxy implementations that call the standalone debug functions
impl fmt::Debug for StackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_stack_coordinator(self, f)
    }
}

impl fmt::Debug for InstanceClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_instance_claim(self, f)
    }
}
