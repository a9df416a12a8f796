//! MessagePack implementation of the value table repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind},
    path::Path,
};

use crate::{
    Result, error::Error, ports::ValueTableRepository, q_learning::SavedValueTable,
};

/// MessagePack-based repository using rmp_serde.
///
/// # Examples
///
/// ```no_run
/// use gridlearn::adapters::MsgPackRepository;
/// use gridlearn::ports::ValueTableRepository;
/// use gridlearn::{SavedValueTable, TrainingMetadata, ValueTable};
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// let saved = SavedValueTable::new(ValueTable::zeros(64, 4), TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("frozen_lake8x8.msgpack"))?;
/// let loaded = repo.load(Path::new("frozen_lake8x8.msgpack"))?;
/// # Ok::<(), gridlearn::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ValueTableRepository for MsgPackRepository {
    fn save(&self, saved: &SavedValueTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, saved).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize value table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.into_inner().map_err(|e| Error::Io {
            operation: format!("write value table to {path:?}"),
            source: e.into_error(),
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedValueTable> {
        let file = File::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::ModelNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io {
                operation: format!("open file {path:?}"),
                source,
            },
        })?;

        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize value table from MessagePack".to_string(),
                message: e.to_string(),
            }
        })
    }
}
