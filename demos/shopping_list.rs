//! Walks through a shopping list session backed by the platform storage dir
//!
//! Run it twice to see the list restored from disk.

use shopping_list::{LoadOutcome, PersistenceBridge, ShoppingInput, ShoppingSession};
use shopping_list_store::{AppName, FileBlobStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    shopping_list::logging::init_logging();

    let app_name = AppName::new("com", "example", "shopping_list_demo");
    let blobs = FileBlobStore::new(&app_name);
    println!("=== Shopping List Demo ===");
    println!("Storage file: {}\n", blobs.path().display());

    let (mut session, outcome) = ShoppingSession::open(PersistenceBridge::new(blobs)).await?;
    match outcome {
        LoadOutcome::Restored(count) => println!("Restored {} item(s)", count),
        LoadOutcome::Partial { restored, skipped } => {
            println!("Restored {} item(s), dropped {} unreadable", restored, skipped)
        }
        LoadOutcome::FirstRun => println!("No saved list yet"),
        LoadOutcome::Corrupted(reason) => println!("Saved list was unreadable: {}", reason),
    }

    println!("\n1. Adding items...");
    session.apply(ShoppingInput::add("Milk", 2, "Dairy"));
    session.apply(ShoppingInput::add("Bread", -3, "Bakery"));
    session.apply(ShoppingInput::add("   ", 1, "Grocery"));

    println!("2. Marking the newest item as purchased...");
    if let Some(id) = session.store().items().first().map(|item| item.id.clone()) {
        session.apply(ShoppingInput::toggle(id));
    }

    println!("3. Saving...");
    session.save_if_dirty().await?;

    println!("\n{}", session.store().summary());
    for item in session.store().items() {
        let mark = if item.purchased { "x" } else { " " };
        println!(
            "  [{}] {} x{} ({})",
            mark, item.name, item.quantity, item.category
        );
    }

    Ok(())
}
