//! Environment-based runtime configuration.
//!
//! `MOTORCADE_STACK_SIZE` sets the stack size for handler coroutines, in
//! decimal (`16384`) or hex (`0x4000`). Coroutine stacks are allocated per
//! handler, so the default stays small; raise it for handlers with deep call
//! chains.

use std::env;

const DEFAULT_STACK_SIZE: usize = 0x4000; // 16 KB

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Stack size for handler coroutines in bytes
    pub stack_size: usize,
}

impl RuntimeConfig {
    /// Load configuration from the environment; silently falls back to the
    /// default on unset or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = env::var("MOTORCADE_STACK_SIZE")
            .ok()
            .and_then(|val| {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).ok()
                } else {
                    val.parse().ok()
                }
            })
            .unwrap_or(DEFAULT_STACK_SIZE);
        RuntimeConfig { stack_size }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}
