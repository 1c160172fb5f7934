use data_error::Result;
use url::Url;

use crate::AvatarRecord;

/// Document store holding one avatar record per user.
pub trait AvatarStore {
    /// Create or replace the record of a user and persist it.
    fn save(&mut self, user_id: &str, record: &AvatarRecord) -> Result<()>;

    /// The persisted record of a user, if any.
    fn load(&self, user_id: &str) -> Result<Option<AvatarRecord>>;

    /// Remove the record of a user.
    /// Fails if the user has no record.
    fn remove(&mut self, user_id: &str) -> Result<()>;
}

/// Object store for uploaded avatar images.
pub trait ImageStore {
    /// Persist raw image bytes for a user and return a durable URL.
    fn put(&self, user_id: &str, bytes: &[u8], extension: &str) -> Result<Url>;
}
