//! Failure policy for quote store operations.
//!
//! Writes fail loudly: a caller must always learn whether its data was saved.
//! Reads fail soft: the HTTP and CLI layers render "no quotes" without
//! special-casing storage errors. Keep the two sides asymmetric.

use std::fmt;

/// A quote store operation, used to look up its failure policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Initialize,
    Write,
    ReadAll,
    ReadById,
    ReadRandom,
    Count,
}

/// What happens to a storage-engine error raised by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log and return the error to the caller.
    Propagate,
    /// Log and return an empty or absent result instead.
    Degrade,
}

impl StoreOperation {
    #[must_use]
    pub const fn failure_policy(self) -> FailurePolicy {
        match self {
            Self::Initialize | Self::Write => FailurePolicy::Propagate,
            Self::ReadAll | Self::ReadById | Self::ReadRandom | Self::Count => {
                FailurePolicy::Degrade
            }
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Write => "write",
            Self::ReadAll => "read_all",
            Self::ReadById => "read_by_id",
            Self::ReadRandom => "read_random",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply a degrading operation's policy to a read result.
///
/// Storage errors are logged and replaced by `T::default()`: an empty `Vec`,
/// `None`, zero, or [`QuoteLookup::Unavailable`](crate::QuoteLookup).
pub(crate) fn degrade<T: Default>(operation: StoreOperation, result: Result<T, sqlx::Error>) -> T {
    debug_assert_eq!(operation.failure_policy(), FailurePolicy::Degrade);
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(operation = %operation, error = %e, "quote store read failed; returning empty result");
            T::default()
        }
    }
}

/// Apply a propagating operation's policy: log the error and hand it back.
pub(crate) fn propagate<T, E: fmt::Display>(
    operation: StoreOperation,
    result: Result<T, E>,
) -> Result<T, E> {
    debug_assert_eq!(operation.failure_policy(), FailurePolicy::Propagate);
    if let Err(e) = &result {
        tracing::error!(operation = %operation, error = %e, "quote store operation failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_initialize_propagate() {
        assert_eq!(
            StoreOperation::Write.failure_policy(),
            FailurePolicy::Propagate
        );
        assert_eq!(
            StoreOperation::Initialize.failure_policy(),
            FailurePolicy::Propagate
        );
    }

    #[test]
    fn reads_degrade() {
        for op in [
            StoreOperation::ReadAll,
            StoreOperation::ReadById,
            StoreOperation::ReadRandom,
            StoreOperation::Count,
        ] {
            assert_eq!(op.failure_policy(), FailurePolicy::Degrade, "{op}");
        }
    }

    #[test]
    fn degrade_replaces_error_with_default() {
        let rows: Vec<i64> = degrade(StoreOperation::ReadAll, Err(sqlx::Error::RowNotFound));
        assert!(rows.is_empty());

        let row: Option<i64> = degrade(StoreOperation::ReadById, Err(sqlx::Error::PoolTimedOut));
        assert!(row.is_none());
    }

    #[test]
    fn propagate_returns_error_unchanged() {
        let result: Result<u64, sqlx::Error> =
            propagate(StoreOperation::Write, Err(sqlx::Error::PoolClosed));
        assert!(matches!(result, Err(sqlx::Error::PoolClosed)));

        let ok: Result<u64, sqlx::Error> = propagate(StoreOperation::Initialize, Ok(2));
        assert_eq!(ok.ok(), Some(2));
    }

    #[test]
    fn degrade_passes_success_through() {
        let count: u64 = degrade(StoreOperation::Count, Ok(3));
        assert_eq!(count, 3);
    }
}
