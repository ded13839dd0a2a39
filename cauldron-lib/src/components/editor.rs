use crate::{
    Repository,
    repository::entities::{Error, Ingredient, Quantity, Result},
};

#[derive(Debug, Clone)]
pub enum Message {
    TitleInput(String),
    QuantitySelected(Quantity),
    NotesInput(String),
    CancelPressed,
    SavePressed,
}

pub enum Action {
    None,
    Cancelled,
    Saved(Ingredient),
}

/// Edits a single ingredient, new or existing.
///
/// Field edits accumulate in a transient draft and only reach the store on
/// save, in one transaction. Cancelling drops the draft, so an existing
/// record is left exactly as it was when the editor opened.
pub struct IngredientEditor {
    repo: Repository,
    target: Option<Ingredient>,
    title: String,
    quantity: Quantity,
    notes: String,
}

impl IngredientEditor {
    /// Open the editor over a fresh, not-yet-persisted draft.
    pub fn new(repo: Repository) -> Self {
        let quantity = repo.default_quantity();

        Self {
            repo,
            target: None,
            title: "".into(),
            quantity,
            notes: "".into(),
        }
    }

    /// Open the editor over an existing record, copying its fields into the draft.
    pub fn edit(repo: Repository, ingredient: Ingredient) -> Result<Self> {
        let title = ingredient.title()?;
        let quantity = ingredient.quantity()?;
        let notes = ingredient.notes()?;

        Ok(Self {
            repo,
            target: Some(ingredient),
            title,
            quantity,
            notes,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Whether the editor updates an existing record rather than creating one.
    pub fn is_updating(&self) -> bool {
        self.target.is_some()
    }

    /// The confirm trigger should be disabled while this returns false.
    pub fn can_save(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn update(&mut self, message: Message) -> Result<Action> {
        match message {
            Message::TitleInput(content) => {
                self.title = content;
                Ok(Action::None)
            }
            Message::QuantitySelected(quantity) => {
                self.quantity = quantity;
                Ok(Action::None)
            }
            Message::NotesInput(content) => {
                self.notes = content;
                Ok(Action::None)
            }
            Message::CancelPressed => Ok(Action::Cancelled),
            Message::SavePressed => Ok(Action::Saved(self.save()?)),
        }
    }

    /// Commit the draft. A failed commit surfaces as an error; the editor
    /// stays open and keeps its draft.
    fn save(&mut self) -> Result<Ingredient> {
        // Checked before any transaction is opened
        if !self.can_save() {
            return Err(Error::EmptyTitle);
        }

        match &self.target {
            Some(ingredient) => {
                ingredient.update(&self.title, self.quantity, &self.notes)?;

                Ok(ingredient.clone())
            }
            None => {
                let ingredient =
                    self.repo
                        .add_ingredient(&self.title, self.quantity, &self.notes)?;

                // The record is tracked now; a second save must update, not duplicate
                self.target = Some(ingredient.clone());

                Ok(ingredient)
            }
        }
    }
}
