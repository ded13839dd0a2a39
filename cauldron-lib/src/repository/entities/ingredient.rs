use std::fmt::Debug;

use agdb::{DbId, DbValue, QueryBuilder};
use tracing::debug;

use crate::repository::{
    db::{Db, models::IngredientModel},
    entities::{EntityId, Error, Quantity, Result, Uid, get_field, set_field},
    watch::Change,
};

/// Represents one ingredient on the shopping list.
///
/// Provides methods to inspect and modify this ingredient's data.
/// Always reflects the current database state.
#[derive(Debug, Clone)]
pub struct Ingredient {
    pub(crate) id: EntityId,
    pub(crate) db: Db,
}

impl Ingredient {
    /// Load some existing [`Ingredient`] from the database
    pub(crate) fn load(db_id: DbId, db: Db) -> Result<Self> {
        let id = EntityId::load(&db, db_id)?;
        Ok(Self { id, db })
    }

    /// Stable identifier assigned at creation, immutable for the record's lifetime.
    pub fn uid(&self) -> u64 {
        self.id.uid().0
    }

    // Fields

    pub fn title(&self) -> Result<String> {
        self.get_field("title")
    }

    pub fn set_title(&self, new_title: &str) -> Result<()> {
        if new_title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        self.set_field("title", new_title)
    }

    pub fn quantity(&self) -> Result<Quantity> {
        Quantity::try_from(self.get_field::<u64>("quantity")?)
    }

    pub fn set_quantity(&self, new_quantity: Quantity) -> Result<()> {
        self.set_field("quantity", u64::from(new_quantity))
    }

    pub fn notes(&self) -> Result<String> {
        self.get_field("notes")
    }

    pub fn set_notes(&self, new_notes: &str) -> Result<()> {
        self.set_field("notes", new_notes)
    }

    pub fn bought(&self) -> Result<bool> {
        self.get_field("bought")
    }

    /// Move this ingredient between the unbought and bought groups.
    ///
    /// Which gesture flips the flag is a frontend concern; the backend only
    /// offers the mutation.
    pub fn set_bought(&self, bought: bool) -> Result<()> {
        self.set_field("bought", bought)
    }

    /// Write the whole editable field set back in a single transaction.
    pub(crate) fn update(&self, title: &str, quantity: Quantity, notes: &str) -> Result<()> {
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        let db_id = self.id.db_id(&self.db)?;
        self.db.write().transaction_mut(|t| -> Result<()> {
            t.exec_mut(
                QueryBuilder::insert()
                    .values([[
                        ("title", title).into(),
                        ("quantity", u64::from(quantity)).into(),
                        ("notes", notes).into(),
                    ]])
                    .ids(db_id)
                    .query(),
            )?;

            Ok(())
        })?;

        self.db.notify(Change::Updated(self.uid()));

        Ok(())
    }

    pub(crate) fn remove(self) -> Result<()> {
        let title = self.title()?;
        let uid = self.uid();

        let db_id = self.id.db_id(&self.db)?;
        self.db
            .write()
            .exec_mut(QueryBuilder::remove().ids(db_id).query())?;

        self.db.notify(Change::Removed(uid));

        debug!("Removed ingredient: {title}");

        Ok(())
    }

    pub(crate) fn add(db: &Db, title: &str, quantity: Quantity, notes: &str) -> Result<Self> {
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        let model = IngredientModel::new(Uid::new(db)?, title, quantity, notes);

        let ingredient_id = db.write().transaction_mut(|t| -> Result<DbId> {
            let ingredient_id = t
                .exec_mut(QueryBuilder::insert().element(model).query())?
                .elements
                .first()
                .expect("IngredientModel insertion should return the ID as the first element")
                .id;

            // Link the ingredient to the root "ingredients" node
            t.exec_mut(
                QueryBuilder::insert()
                    .edges()
                    .from("ingredients")
                    .to(ingredient_id)
                    .query(),
            )?;

            Ok(ingredient_id)
        })?;

        let ingredient = Ingredient::load(ingredient_id, db.clone())?;

        db.notify(Change::Inserted(ingredient.uid()));

        debug!("Added ingredient: {title}");

        Ok(ingredient)
    }

    pub(crate) fn list(db: &Db) -> Result<Vec<Self>> {
        let mut ingredients = db
            .read()
            .exec(
                QueryBuilder::select()
                    .elements::<IngredientModel>()
                    .search()
                    .from("ingredients")
                    .where_()
                    .neighbor()
                    .query(),
            )?
            .elements
            .iter()
            .map(|e| Ingredient::load(e.id, db.clone()))
            .collect::<Result<Vec<_>>>()?;

        // Insertion order, regardless of graph traversal order
        ingredients.sort_by_key(Ingredient::uid);

        Ok(ingredients)
    }

    fn get_field<T>(&self, field: &str) -> Result<T>
    where
        T: TryFrom<DbValue>,
        T::Error: Debug,
    {
        get_field(&self.db, self.id, field)
    }

    fn set_field<T>(&self, field: &str, value: T) -> Result<()>
    where
        T: Into<DbValue>,
    {
        set_field(&self.db, self.id, field, value)?;

        self.db.notify(Change::Updated(self.uid()));

        Ok(())
    }
}

impl PartialEq for Ingredient {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod test {
    use crate::{
        Repository,
        repository::{Change, Quantity, entities::Error},
    };

    #[test]
    fn test_add() {
        let repo = Repository::mock();

        let ingredient = repo.add_ingredient("Garlic", Quantity::Two, "").unwrap();

        assert_eq!(ingredient.title().unwrap(), "Garlic");
        assert_eq!(ingredient.quantity().unwrap(), Quantity::Two);
        assert_eq!(ingredient.notes().unwrap(), "");
        assert!(!ingredient.bought().unwrap());
    }

    #[test]
    fn test_add_empty_title() {
        let repo = Repository::mock();

        assert!(matches!(
            repo.add_ingredient("", Quantity::One, "urgent"),
            Err(Error::EmptyTitle)
        ));
        assert_eq!(repo.ingredients().unwrap().len(), 0);
    }

    #[test]
    fn test_list_insertion_order() {
        let repo = Repository::mock();

        let eye = repo.add_ingredient("Eye of newt", Quantity::One, "").unwrap();
        let toe = repo.add_ingredient("Toe of frog", Quantity::Three, "").unwrap();

        let uids: Vec<u64> = repo.ingredients().unwrap().iter().map(|i| i.uid()).collect();

        assert_eq!(uids, vec![eye.uid(), toe.uid()]);
    }

    #[test]
    fn test_find_by_uid() {
        let repo = Repository::mock();

        let ingredient = repo.add_ingredient("Mandrake", Quantity::One, "").unwrap();

        assert_eq!(
            repo.find_ingredient(ingredient.uid()).unwrap().unwrap(),
            ingredient
        );
        assert!(repo.find_ingredient(9000).unwrap().is_none());
    }

    #[test]
    fn test_set_fields() {
        let repo = Repository::mock();

        let ingredient = repo.add_ingredient("Wolfsbane", Quantity::One, "").unwrap();

        ingredient.set_quantity(Quantity::Four).unwrap();
        ingredient.set_notes("dried, not fresh").unwrap();
        ingredient.set_bought(true).unwrap();

        assert_eq!(ingredient.quantity().unwrap(), Quantity::Four);
        assert_eq!(ingredient.notes().unwrap(), "dried, not fresh");
        assert!(ingredient.bought().unwrap());
    }

    #[test]
    fn test_set_empty_title_rejected() {
        let repo = Repository::mock();

        let ingredient = repo.add_ingredient("Nettle", Quantity::One, "").unwrap();

        assert!(matches!(ingredient.set_title(""), Err(Error::EmptyTitle)));
        assert_eq!(ingredient.title().unwrap(), "Nettle");
    }

    #[test]
    fn test_remove() {
        let repo = Repository::mock();

        let ingredient = repo.add_ingredient("Bat wing", Quantity::Five, "").unwrap();
        let stale = ingredient.clone();

        ingredient.remove().unwrap();

        assert_eq!(repo.ingredients().unwrap().len(), 0);
        assert!(matches!(stale.title(), Err(Error::RemovedEntity)));
        assert!(matches!(stale.remove(), Err(Error::RemovedEntity)));
    }

    #[test]
    fn test_changes_published_after_commit() {
        let repo = Repository::mock();
        let subscription = repo.subscribe();

        let ingredient = repo.add_ingredient("Sage", Quantity::One, "").unwrap();
        ingredient.set_bought(true).unwrap();
        ingredient.clone().remove().unwrap();

        assert_eq!(
            subscription.drain(),
            vec![
                Change::Inserted(ingredient.uid()),
                Change::Updated(ingredient.uid()),
                Change::Removed(ingredient.uid()),
            ]
        );
    }

    #[test]
    fn test_rejected_save_publishes_nothing() {
        let repo = Repository::mock();
        let subscription = repo.subscribe();

        let _ = repo.add_ingredient("", Quantity::One, "");

        assert!(!subscription.has_pending());
    }
}
