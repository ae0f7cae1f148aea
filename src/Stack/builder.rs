use super::coordinator::{ReleasePolicy, StackCoordinator};
use super::layout::DEFAULT_STACK_KEY;
use crate::config::defaults::DEFAULT_PADDING;

pub struct CoordinatorBuilder {
    key: i32,
    gap: u32,
    policy: ReleasePolicy,
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self {
            key: DEFAULT_STACK_KEY,
            gap: DEFAULT_PADDING,
            policy: ReleasePolicy::LastClaimant,
        }
    }
}

impl CoordinatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: i32) -> Self {
        self.key = key;
        self
    }

    /// Space left between two stacked popups, added to every claim.
    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_policy(mut self, policy: ReleasePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> std::io::Result<StackCoordinator> {
        StackCoordinator::attach(self.key, self.gap, self.policy)
    }
}
