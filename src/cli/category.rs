//! Category CLI commands
//!
//! Managing the category catalog that gives each category its color.

use clap::Subcommand;

use crate::engine::distinct_categories;
use crate::error::ExpenseResult;
use crate::models::{Category, COLOR_PALETTE, DEFAULT_CATEGORY_COLOR};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List catalog categories and how many expenses use each
    #[command(alias = "ls")]
    List,

    /// Add a category to the catalog
    Add {
        /// Category name
        name: String,

        /// Display color (e.g. "#22c55e"); defaults to an unused palette color
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename or recolor a category; its expenses and budget follow
    Edit {
        /// Current category name
        category: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New color
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove an unused category from the catalog
    #[command(alias = "rm")]
    Remove {
        /// Category name
        category: String,
    },
}

/// Handle category commands
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> ExpenseResult<()> {
    match cmd {
        CategoryCommands::List => {
            let catalog = storage.categories.get_all()?;
            let records = storage.expenses.get_all()?;

            if catalog.is_empty() && records.is_empty() {
                println!("No categories yet.");
                return Ok(());
            }

            println!("{:<30} {:<8} {:>8}", "Category", "Color", "Expenses");
            println!("{}", "-".repeat(48));
            for category in &catalog {
                let count = records.iter().filter(|r| r.category == category.name).count();
                println!("{:<30} {:<8} {:>8}", category.name, category.color, count);
            }

            let uncatalogued: Vec<String> = distinct_categories(&records)
                .into_iter()
                .filter(|name| !catalog.iter().any(|c| &c.name == name))
                .collect();
            if !uncatalogued.is_empty() {
                println!("\nIn use but not in the catalog:");
                for name in uncatalogued {
                    println!("  {}", name);
                }
            }
        }

        CategoryCommands::Add { name, color } => {
            let color = match color {
                Some(color) => color,
                None => next_palette_color(&storage.categories.get_all()?).to_string(),
            };
            let category = storage.add_category(&name, &color)?;
            println!("Added category: {}", category);
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
        } => {
            if name.is_none() && color.is_none() {
                println!("No changes specified. Use --name or --color.");
                return Ok(());
            }

            let (updated, rewritten) =
                storage.edit_category(&category, name.as_deref(), color.as_deref())?;
            println!("Updated category: {}", updated);
            if rewritten > 0 {
                println!("  {} expense(s) updated", rewritten);
            }
        }

        CategoryCommands::Remove { category } => {
            let removed = storage.remove_category(&category)?;
            println!("Removed category: {}", removed);
        }
    }

    Ok(())
}

/// First palette color no catalog category uses yet
fn next_palette_color(catalog: &[Category]) -> &'static str {
    COLOR_PALETTE
        .iter()
        .find(|color| !catalog.iter().any(|c| c.color.eq_ignore_ascii_case(color)))
        .copied()
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_palette_color() {
        assert_eq!(next_palette_color(&[]), "#ef4444");
        // Presets take eight palette colors
        assert_eq!(next_palette_color(&Category::presets()), "#eab308");

        let full: Vec<_> = COLOR_PALETTE
            .iter()
            .map(|color| Category::new(*color, *color))
            .collect();
        assert_eq!(next_palette_color(&full), DEFAULT_CATEGORY_COLOR);
    }
}
