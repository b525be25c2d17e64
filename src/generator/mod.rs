pub mod cleaning;
pub mod fetch;
pub mod offline;
pub mod passage;
pub mod wikipedia;

use crate::error::FetchError;

/// Supplies one raw article extract per call. Implementations may block;
/// the builder calls them sequentially from a worker thread.
pub trait ExtractSource {
    fn fetch_extract(&mut self) -> Result<String, FetchError>;
}

impl<S: ExtractSource + ?Sized> ExtractSource for Box<S> {
    fn fetch_extract(&mut self) -> Result<String, FetchError> {
        (**self).fetch_extract()
    }
}
