//! Document source capability

use crate::document::{DocumentId, DocumentRecord};
use crate::error::Result;

/// A backend able to resolve identifiers into document records.
///
/// The matrix builder and the encoders depend only on this trait; the
/// filesystem and document-store backends implement it in
/// `textbatch-sources`.
pub trait DocumentSource: Send + Sync {
    /// Fetch one document record by identifier
    fn fetch(&self, id: &DocumentId) -> Result<DocumentRecord>;

    /// Fetch records for `ids`, in request order.
    ///
    /// The default resolves identifiers one by one. Backends with a
    /// cheaper set query override this, but must still return record `i`
    /// for identifier `i`: tensor rows are aligned by position.
    fn fetch_batch(&self, ids: &[DocumentId]) -> Result<Vec<DocumentRecord>> {
        ids.iter().map(|id| self.fetch(id)).collect()
    }
}
