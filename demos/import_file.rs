use bank_import_rs::{CategoryRules, ImportBuilder};
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Usage: cargo run --example import_file [path/to/statement] [path/to/rules.json]
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        args[1].as_str()
    } else {
        println!("Using example CSV data from demos/sample.csv\n");
        "demos/sample.csv"
    };

    let mut builder = ImportBuilder::new().filename(file_path);
    if let Some(rules_path) = args.get(2) {
        builder = builder.rules(Arc::new(CategoryRules::from_path(rules_path)?));
    }

    let transactions = builder.parse_categorized()?;

    if transactions.is_empty() {
        println!("Nothing importable in {}", file_path);
        return Ok(());
    }

    println!("Found {} transactions\n", transactions.len());

    for (i, item) in transactions.iter().take(10).enumerate() {
        let tx = &item.transaction;
        println!("Transaction {}:", i + 1);
        println!("  Due: {}", tx.due_date.format("%Y-%m-%d"));
        println!("  Amount: {}", tx.amount);
        println!("  Direction: {}", tx.direction.as_str());
        println!("  Description: {}", tx.description);
        println!("  Category: {}", item.category);
        println!();
    }

    if transactions.len() > 10 {
        println!("... and {} more transactions", transactions.len() - 10);
    }

    println!("As JSON:\n{}", serde_json::to_string_pretty(&transactions)?);

    Ok(())
}
