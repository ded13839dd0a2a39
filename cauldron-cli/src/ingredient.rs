use cauldron_lib::{
    Repository, Result,
    components::{
        IngredientEditor, IngredientList,
        editor::{Action, Message},
    },
    repository::{Ingredient, Quantity},
};
use colored::Colorize;

pub fn list(repo: &Repository) -> Result<()> {
    let list = IngredientList::new(repo.clone())?;

    println!("{}", "Ingredients".bold());
    if list.unbought().is_empty() {
        println!("  {}", "Add some ingredients to the list".dimmed());
    }
    for ingredient in list.unbought() {
        print_row(ingredient)?;
    }

    println!("{}", "Bought".bold());
    if list.bought().is_empty() {
        println!(
            "  {}",
            "Buy some ingredients to have them listed here.".dimmed()
        );
    } else {
        for ingredient in list.bought() {
            print_row(ingredient)?;
        }
        println!(
            "  {}",
            "Remove a bought ingredient with `cauldron remove <ID>`.".dimmed()
        );
    }

    Ok(())
}

fn print_row(ingredient: &Ingredient) -> Result<()> {
    let notes = ingredient.notes()?;
    let mut row = format!(
        "{:>4}  {} x{}",
        ingredient.uid(),
        ingredient.title()?,
        ingredient.quantity()?
    );
    if !notes.is_empty() {
        row.push_str(&format!(" ({notes})"));
    }

    println!("  {row}");

    Ok(())
}

pub fn add(repo: &Repository, title: &str, quantity: Option<Quantity>, notes: &str) -> Result<()> {
    let mut editor = IngredientEditor::new(repo.clone());

    editor.update(Message::TitleInput(title.to_string()))?;
    if let Some(quantity) = quantity {
        editor.update(Message::QuantitySelected(quantity))?;
    }
    editor.update(Message::NotesInput(notes.to_string()))?;

    if let Action::Saved(ingredient) = editor.update(Message::SavePressed)? {
        println!(
            "Added {} ({})",
            ingredient.title()?.green(),
            ingredient.uid()
        );
    }

    Ok(())
}

pub fn remove(repo: &Repository, id: u64) -> Result<()> {
    let mut list = IngredientList::new(repo.clone())?;

    if let Some(ingredient) = list.bought().iter().find(|i| i.uid() == id).cloned() {
        let title = ingredient.title()?;

        list.remove_bought(&ingredient)?;

        println!("Removed {title}");
    } else if list.unbought().iter().any(|i| i.uid() == id) {
        eprintln!("Ingredient {id} hasn't been bought yet; only bought ingredients can be removed");
    } else {
        eprintln!("No ingredient with ID {id}");
    }

    Ok(())
}
