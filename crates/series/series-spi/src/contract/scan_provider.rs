//! Range scan trait definition.

use crate::error::Result;
use crate::model::ScanEvent;

/// Stream of scan events produced by a single range scan.
///
/// A well-formed stream yields zero or more [`ScanEvent::Row`] items followed
/// by exactly one [`ScanEvent::Complete`]. A stream that ends without the
/// completion sentinel was truncated.
pub type RowStream<'a> = Box<dyn Iterator<Item = Result<ScanEvent>> + 'a>;

/// Trait for sorted key-value stores that can serve range scans.
///
/// Keys are compared bytewise. Implementations must return rows in ascending
/// key order and only rows whose key lies in `[start, end)`.
pub trait ScanProvider: Send + Sync {
    /// Store name, used in log and error messages.
    fn name(&self) -> &str;

    /// Open a streaming scan over `[start, end)`.
    ///
    /// Errors raised while opening or while streaming are reported as
    /// [`SeriesError::SourceUnavailable`](crate::SeriesError::SourceUnavailable).
    fn scan_range(&self, start: &[u8], end: &[u8]) -> Result<RowStream<'_>>;
}
