//! Repository port for value table persistence.

use std::path::Path;

use crate::{Result, q_learning::SavedValueTable};

/// Port for persisting and loading trained value tables.
///
/// The storage format is an adapter detail; callers only hand over a
/// [`SavedValueTable`] and a location.
///
/// # Examples
///
/// ```no_run
/// use gridlearn::ports::ValueTableRepository;
/// use gridlearn::SavedValueTable;
/// use std::path::Path;
///
/// fn save_model<R: ValueTableRepository>(
///     repo: &R,
///     saved: &SavedValueTable,
///     path: &Path,
/// ) -> gridlearn::Result<()> {
///     repo.save(saved, path)
/// }
/// ```
pub trait ValueTableRepository {
    /// Save a table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, saved: &SavedValueTable, path: &Path) -> Result<()>;

    /// Load a table from persistent storage.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::ModelNotFound`] if nothing was saved at `path`
    /// - a serialization error if the artifact is corrupted
    fn load(&self, path: &Path) -> Result<SavedValueTable>;
}
