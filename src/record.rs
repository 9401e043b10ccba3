use crate::attribute_store::AttributeStore;
use crate::error::AttributeError;

// ─── Persistence seam ───────────────────────────────────────────────────────

/// The single serialized column of a persisted record.
///
/// Implemented by the persistence layer; this crate never does I/O itself.
pub trait BlobRecord {
    fn blob(&self) -> Option<&[u8]>;
    fn set_blob(&mut self, blob: Option<Vec<u8>>);
}

/// A record whose typed attributes live in its blob column.
///
/// The persistence layer calls [`load_attributes`](Self::load_attributes)
/// after fetching a row and [`before_write`](Self::before_write) immediately
/// before every write. Whether a write then goes ahead is up to the caller.
pub trait SerializedRecord: BlobRecord {
    fn attributes(&self) -> &AttributeStore;
    fn attributes_mut(&mut self) -> &mut AttributeStore;

    /// Decode the blob column into the attribute store, resetting change
    /// tracking.
    fn load_attributes(&mut self) -> Result<(), AttributeError> {
        let blob = self.blob().map(<[u8]>::to_vec);
        self.attributes_mut().reload(blob.as_deref())
    }

    /// Re-encode the attributes into the blob column.
    ///
    /// Runs off the attribute store, so it also repairs a blob column that
    /// was cleared or overwritten since the last load.
    fn before_write(&mut self) -> Result<(), AttributeError> {
        let blob = self.attributes_mut().flush()?;
        self.set_blob(Some(blob));
        Ok(())
    }
}
