use color_eyre::Result;
use famhub_core::model::{split_csv, MealType};
use famhub_entity::{
    groceries::{GroceryDraft, GroceryRepo},
    meals::{MealDraft, MealRepo},
};
use uuid::Uuid;

use crate::{
    cli::{GroceryCommand, MealCommand},
    config, session, storage,
};

pub async fn handle_grocery(cmd: GroceryCommand, config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    let repo = GroceryRepo::new(store.clone());

    match cmd {
        GroceryCommand::Add {
            name,
            quantity,
            category,
        } => {
            let added_by = session::current_member_name(store).await;
            let item = repo
                .add(GroceryDraft {
                    name,
                    quantity,
                    category,
                    added_by,
                })
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!("Added {} x{} to the grocery list.", item.name, item.quantity);
        }
        GroceryCommand::List => {
            let items = repo.list().await;
            if items.is_empty() {
                println!("Grocery list is empty.");
                return Ok(());
            }
            for item in items {
                let mark = if item.checked { "x" } else { " " };
                println!("{} [{}] {} x{}", item.id, mark, item.name, item.quantity);
            }
        }
        GroceryCommand::Toggle { id } => {
            let uuid = Uuid::parse_str(&id).map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            let item = repo
                .toggle(uuid)
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            let state = if item.checked { "checked" } else { "unchecked" };
            println!("{} is now {state}.", item.name);
        }
    }

    Ok(())
}

pub async fn handle_meal(cmd: MealCommand, config: &config::Config) -> Result<()> {
    let repo = MealRepo::new(storage::store_from_config(config)?);

    match cmd {
        MealCommand::Add {
            recipe,
            date,
            meal_type,
            ingredients,
        } => {
            let meal = repo
                .add(MealDraft {
                    date,
                    meal_type: meal_type.into(),
                    recipe,
                    ingredients: split_csv(&ingredients),
                })
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!(
                "Planned {} for {} {}.",
                meal.recipe,
                meal_label(meal.meal_type),
                meal.date
            );
        }
        MealCommand::List => {
            let meals = repo.list().await;
            if meals.is_empty() {
                println!("No meals planned yet.");
                return Ok(());
            }
            for meal in meals {
                println!(
                    "{} {} {}: {}",
                    meal.id,
                    meal.date,
                    meal_label(meal.meal_type),
                    meal.recipe
                );
                if !meal.ingredients.is_empty() {
                    println!("    needs: {}", meal.ingredients.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn meal_label(meal_type: MealType) -> &'static str {
    match meal_type {
        MealType::Breakfast => "breakfast",
        MealType::Lunch => "lunch",
        MealType::Dinner => "dinner",
        MealType::Snack => "snack",
    }
}
