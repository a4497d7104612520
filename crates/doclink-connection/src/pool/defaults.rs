//! Pool defaults applied to unset options

use doclink_core::PoolOptions;

/// Values used for pool options a caller leaves unset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolDefaults {
    min_pool_size: u32,
    max_pool_size: u32,
    server_selection_timeout_ms: u64,
    socket_timeout_ms: u64,
}

impl PoolDefaults {
    pub fn new(
        min_pool_size: u32,
        max_pool_size: u32,
        server_selection_timeout_ms: u64,
        socket_timeout_ms: u64,
    ) -> Self {
        Self {
            min_pool_size,
            max_pool_size,
            server_selection_timeout_ms,
            socket_timeout_ms,
        }
    }

    /// Fill every unset field of `options` from these defaults
    pub fn apply(&self, mut options: PoolOptions) -> PoolOptions {
        options.min_pool_size = options.min_pool_size.or(Some(self.min_pool_size));
        options.max_pool_size = options.max_pool_size.or(Some(self.max_pool_size));
        options.server_selection_timeout_ms = options
            .server_selection_timeout_ms
            .or(Some(self.server_selection_timeout_ms));
        options.socket_timeout_ms = options.socket_timeout_ms.or(Some(self.socket_timeout_ms));
        options
    }

    pub fn min_pool_size(&self) -> u32 {
        self.min_pool_size
    }

    pub fn max_pool_size(&self) -> u32 {
        self.max_pool_size
    }

    pub fn server_selection_timeout_ms(&self) -> u64 {
        self.server_selection_timeout_ms
    }

    pub fn socket_timeout_ms(&self) -> u64 {
        self.socket_timeout_ms
    }
}

impl Default for PoolDefaults {
    /// Defaults:
    /// - min_pool_size: 2
    /// - max_pool_size: 10
    /// - server_selection_timeout: 5 seconds
    /// - socket_timeout: 45 seconds
    fn default() -> Self {
        Self::new(2, 10, 5_000, 45_000)
    }
}
