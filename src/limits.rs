//! Resource limits for materializing asynchronous sources.

use crate::ConvertError;

/// Resource limits for drain operations.
///
/// Used to bound memory when a stream, reader, blob or response body is
/// materialized into a buffer. All limits are optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of bytes collected from one source.
    pub max_bytes: Option<u64>,
}

impl Limits {
    /// Create a new Limits with no restrictions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Limit drains to `max_bytes`.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Check a running byte count against the limit.
    pub fn check_bytes(&self, bytes: u64) -> Result<(), ConvertError> {
        if let Some(limit) = self.max_bytes {
            if bytes > limit {
                return Err(ConvertError::LimitExceeded {
                    limit,
                    actual: bytes,
                });
            }
        }
        Ok(())
    }
}
