// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time tuning for a [`QuadTree`](crate::QuadTree).

/// Default leaf capacity.
pub const DEFAULT_CAPACITY: usize = 10;

/// Default depth below which nodes stop splitting.
pub const DEFAULT_MAX_DEPTH: u32 = 32;

/// What happens to children that are still overfull right after a split.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SplitPolicy {
    /// Split overfull children immediately, so every leaf is within capacity
    /// once an insert returns (up to [`QuadTreeConfig::max_depth`]).
    #[default]
    Cascade,
    /// Leave overfull children as leaves; the next insert that lands in one
    /// of them splits it.
    Lazy,
}

/// Construction parameters, fixed for the lifetime of the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuadTreeConfig {
    /// Maximum number of objects a leaf holds before it splits. Must be at least 1.
    pub capacity: usize,
    /// Nodes at this depth never split. Coincident coordinates would otherwise
    /// split forever.
    pub max_depth: u32,
    /// Handling of overfull children after a split.
    pub split_policy: SplitPolicy,
}

impl QuadTreeConfig {
    /// Default configuration with the given leaf capacity.
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            max_depth: DEFAULT_MAX_DEPTH,
            split_policy: SplitPolicy::Cascade,
        }
    }

    /// Replace the depth limit.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the split policy.
    #[must_use]
    pub const fn split_policy(mut self, split_policy: SplitPolicy) -> Self {
        self.split_policy = split_policy;
        self
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let cfg = QuadTreeConfig::with_capacity(3)
            .max_depth(4)
            .split_policy(SplitPolicy::Lazy);
        assert_eq!(cfg.capacity, 3);
        assert_eq!(cfg.max_depth, 4);
        assert_eq!(cfg.split_policy, SplitPolicy::Lazy);
        assert_eq!(QuadTreeConfig::default().capacity, DEFAULT_CAPACITY);
    }
}
