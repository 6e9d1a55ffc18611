use std::sync::Arc;

use recipe_assistant::api::ForkifyClient;
use recipe_assistant::app::{Action, AppState, Outcome};
use recipe_assistant::storage::settings::load_settings;
use recipe_assistant::storage::{JsonFileStore, KeyValuePersistence, MemoryStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [page]", args[0]);
        eprintln!("Example: {} pizza 2", args[0]);
        std::process::exit(1);
    }
    let query = &args[1];
    let page: usize = match args.get(2) {
        Some(page) => page.parse()?,
        None => 1,
    };

    let settings = load_settings();
    let client = Arc::new(ForkifyClient::from_settings(&settings)?);
    let persistence: Arc<dyn KeyValuePersistence> = match JsonFileStore::in_data_dir() {
        Ok(store) => {
            tracing::info!("Liked recipes are stored in {}", store.dir().display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("Liked recipes will not be saved: {}", e);
            Arc::new(MemoryStore::new())
        }
    };

    let mut app = AppState::new(settings, client.clone(), client, persistence);

    app.search(query).await?;
    let hits = match app.dispatch(Action::GoToPage(page))? {
        Outcome::Page { hits, info } => {
            println!("Page {} of {} for '{}':", info.page, info.total_pages, query);
            for hit in &hits {
                println!("  [{}] {} ({})", hit.id, hit.title, hit.author);
            }
            hits
        }
        _ => Vec::new(),
    };

    let Some(first) = hits.first() else {
        println!("No more results.");
        return Ok(());
    };

    app.select_recipe(&first.id).await?;
    if let Some(recipe) = app.recipe() {
        println!();
        println!("{} by {}", recipe.title(), recipe.author());
        println!(
            "{} servings, about {} minutes",
            recipe.current_servings(),
            recipe.prep_time_minutes()
        );
        for ingredient in recipe.scaled_ingredients() {
            println!("  - {}", ingredient);
        }
    }

    let liked = app.likes().count();
    if liked > 0 {
        println!();
        println!("{} liked recipes:", liked);
        for like in app.likes().iter() {
            println!("  [{}] {}", like.id, like.title);
        }
    }

    Ok(())
}
