use crate::{
    Repository,
    components::editor::IngredientEditor,
    repository::{
        entities::{Error, Ingredient, Result},
        watch::Subscription,
    },
};

/// Live view over the ingredient collection, split into an unbought and a
/// bought section.
///
/// The projections are re-derived from the store whenever committed changes
/// are drained from the subscription. Every persisted ingredient lands in
/// exactly one section, determined solely by its bought flag.
pub struct IngredientList {
    repo: Repository,
    subscription: Subscription,
    unbought: Vec<Ingredient>,
    bought: Vec<Ingredient>,
}

impl IngredientList {
    pub fn new(repo: Repository) -> Result<Self> {
        let subscription = repo.subscribe();
        let mut list = Self {
            repo,
            subscription,
            unbought: Vec::new(),
            bought: Vec::new(),
        };

        list.refresh()?;

        Ok(list)
    }

    /// Ingredients still to buy, in insertion order.
    pub fn unbought(&self) -> &[Ingredient] {
        &self.unbought
    }

    /// Ingredients already bought, in insertion order.
    pub fn bought(&self) -> &[Ingredient] {
        &self.bought
    }

    /// Refresh the projections if any committed changes are pending. Returns
    /// whether a refresh happened.
    pub fn poll(&mut self) -> Result<bool> {
        if !self.subscription.has_pending() {
            return Ok(false);
        }

        self.refresh()?;

        Ok(true)
    }

    /// Re-derive both projections from the store.
    pub fn refresh(&mut self) -> Result<()> {
        // A full re-read subsumes anything still queued
        self.subscription.drain();

        self.unbought.clear();
        self.bought.clear();

        for ingredient in self.repo.ingredients()? {
            if ingredient.bought()? {
                self.bought.push(ingredient);
            } else {
                self.unbought.push(ingredient);
            }
        }

        Ok(())
    }

    /// Hand out an editor over a fresh draft.
    pub fn open_new_ingredient(&self) -> IngredientEditor {
        IngredientEditor::new(self.repo.clone())
    }

    /// Remove an ingredient from the bought section.
    ///
    /// Targets are resolved by identity, never by row position, so a record
    /// that was already removed elsewhere is a no-op rather than a
    /// mis-delete. Only the bought section offers removal; callers pick the
    /// target from [`Self::bought`].
    pub fn remove_bought(&mut self, ingredient: &Ingredient) -> Result<()> {
        ingredient
            .clone()
            .remove()
            .or_else(|err| match err {
                Error::RemovedEntity => Ok(()), // if the id is stale, assume already removed
                other => Err(other),
            })?;

        self.refresh()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        components::editor::{Action, Message},
        repository::Quantity,
    };

    #[test]
    fn test_saved_ingredient_lands_in_unbought_only() {
        let repo = Repository::mock();
        let mut list = IngredientList::new(repo.clone()).unwrap();

        let mut editor = list.open_new_ingredient();
        editor.update(Message::TitleInput("Garlic".into())).unwrap();
        editor
            .update(Message::QuantitySelected(Quantity::Two))
            .unwrap();
        let Action::Saved(ingredient) = editor.update(Message::SavePressed).unwrap() else {
            panic!("save should report the persisted ingredient");
        };

        assert!(list.poll().unwrap());
        assert_eq!(list.unbought(), [ingredient.clone()]);
        assert!(list.bought().is_empty());
    }

    #[test]
    fn test_poll_without_changes_is_a_no_op() {
        let repo = Repository::mock();
        let mut list = IngredientList::new(repo).unwrap();

        assert!(!list.poll().unwrap());
    }

    #[test]
    fn test_sections_are_disjoint_and_exhaustive() {
        let repo = Repository::mock();

        let eye = repo.add_ingredient("Eye of newt", Quantity::One, "").unwrap();
        let toe = repo.add_ingredient("Toe of frog", Quantity::Two, "").unwrap();
        toe.set_bought(true).unwrap();

        let list = IngredientList::new(repo.clone()).unwrap();

        assert_eq!(list.unbought(), [eye]);
        assert_eq!(list.bought(), [toe]);
        assert_eq!(
            list.unbought().len() + list.bought().len(),
            repo.ingredients().unwrap().len()
        );
    }

    #[test]
    fn test_bought_flag_moves_an_ingredient_between_sections() {
        let repo = Repository::mock();
        let ingredient = repo.add_ingredient("Sage", Quantity::One, "").unwrap();

        let mut list = IngredientList::new(repo).unwrap();
        assert_eq!(list.unbought().len(), 1);

        ingredient.set_bought(true).unwrap();

        assert!(list.poll().unwrap());
        assert!(list.unbought().is_empty());
        assert_eq!(list.bought(), [ingredient]);
    }

    #[test]
    fn test_remove_bought() {
        let repo = Repository::mock();

        let keep = repo.add_ingredient("Mint", Quantity::One, "").unwrap();
        let gone = repo.add_ingredient("Basil", Quantity::Two, "").unwrap();
        gone.set_bought(true).unwrap();

        let mut list = IngredientList::new(repo.clone()).unwrap();
        let target = list.bought().first().unwrap().clone();

        list.remove_bought(&target).unwrap();

        assert!(list.bought().is_empty());
        assert_eq!(list.unbought(), [keep]);
        assert_eq!(repo.ingredients().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_bought_twice_is_a_no_op() {
        let repo = Repository::mock();

        let ingredient = repo.add_ingredient("Clove", Quantity::One, "").unwrap();
        ingredient.set_bought(true).unwrap();

        let mut list = IngredientList::new(repo.clone()).unwrap();
        let target = list.bought().first().unwrap().clone();

        // Removed out from under the list between gesture and execution
        repo.find_ingredient(target.uid())
            .unwrap()
            .unwrap()
            .remove()
            .unwrap();

        list.remove_bought(&target).unwrap();

        assert!(list.bought().is_empty());
        assert_eq!(repo.ingredients().unwrap().len(), 0);
    }
}
