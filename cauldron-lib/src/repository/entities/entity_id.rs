use agdb::{DbId, QueryBuilder};
use derive_more::PartialEq;

use crate::repository::{
    db::Db,
    entities::{Error, Result},
};

/// A unique identifier that specifies a particular entity. Allocated from a
/// persistent counter, never reused, even across deletions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Uid(pub(crate) u64);

impl Uid {
    /// Allocate a fresh UID from the database's counter.
    pub fn new(db: &Db) -> Result<Self> {
        let uid = db.write().transaction_mut(|t| -> Result<u64> {
            let uid = t
                .exec(
                    QueryBuilder::select()
                        .values("next_uid")
                        .ids("next_uid")
                        .query(),
                )?
                .elements
                .pop()
                .expect("successful queries should not be empty")
                .values
                .pop()
                .expect("successful queries should not be empty")
                .value
                .to_u64()?;

            t.exec_mut(
                QueryBuilder::insert()
                    .values([[("next_uid", uid + 1).into()]])
                    .ids("next_uid")
                    .query(),
            )?;

            Ok(uid)
        })?;

        Ok(Self(uid))
    }

    /// Read the UID stored on an existing element.
    pub fn load(db: &Db, db_id: DbId) -> Result<Self> {
        let uid = db
            .read()
            .exec(QueryBuilder::select().values("uid").ids(db_id).query())?
            .elements
            .pop()
            .expect("successful queries should not be empty")
            .values
            .pop()
            .expect("successful queries should not be empty")
            .value
            .to_u64()?;

        Ok(Self(uid))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EntityId {
    #[partial_eq(ignore)]
    db_id: DbId,
    /// A unique idenifier that specifies a particular entity
    uid: Uid,
}

impl EntityId {
    /// Load an [`EntityId`] from an existing element.
    pub fn load(db: &Db, db_id: DbId) -> Result<Self> {
        Ok(Self {
            db_id,
            uid: Uid::load(db, db_id)?,
        })
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// Get the underlying [`DbId`]. This will check to make sure it isn't stale before returning.
    pub fn db_id(&self, db: &Db) -> Result<DbId> {
        let uid = Uid::load(db, self.db_id).map_err(|err| {
            match err {
                Error::Internal(e) => {
                    // TODO: Match on DbError kind once the following is completed:
                    // https://github.com/agnesoft/agdb/issues/1687
                    let not_found = format!("Id '{}' not found", self.db_id.as_index());
                    if e.description == not_found {
                        Error::RemovedEntity
                    } else {
                        Error::Internal(e)
                    }
                }
                other => other,
            }
        })?;

        // If the UID changed, that means this DbId now refers to a different or deleted entity
        if uid != self.uid {
            return Err(Error::RemovedEntity);
        }

        Ok(self.db_id)
    }
}
