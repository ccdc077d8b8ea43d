use anyhow::{bail, Context, Result};
use budget_store::{
    Entry, EntryIdentity, PersistentMapping, PersistentSet, StoreConfig, CATEGORIES, ENTRIES,
};
use chrono::NaiveDate;
use std::env;

type Categories = PersistentMapping<String, Vec<String>>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let config = StoreConfig::from_env();

    match args.get(1).map(String::as_str) {
        None | Some("summary") => run_summary(&config),
        Some("add") => run_add(&config, &args[2..]),
        Some("categories") => run_categories(&config),
        Some(other) => {
            eprintln!("   Usage: budget-store [summary | add <bank_code> <YYYY-MM-DD> <amount> <category> [sub_category] | categories]");
            bail!("Unknown command: {}", other);
        }
    }
}

fn open_entries(config: &StoreConfig) -> PersistentSet<Entry, EntryIdentity> {
    PersistentSet::open(config, ENTRIES, EntryIdentity, Vec::new())
}

fn run_summary(config: &StoreConfig) -> Result<()> {
    println!("📊 Budget summary ({})", config.data_dir().display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let entries = open_entries(config);
    println!("✓ {} entries", entries.len());
    println!("✓ Net total: {:.2}", Entry::total(&entries));

    for (category, total) in Entry::totals_by_category(&entries) {
        println!("  {:<24} {:>12.2}", category, total);
    }

    Ok(())
}

fn run_add(config: &StoreConfig, args: &[String]) -> Result<()> {
    if args.len() < 4 {
        bail!("add needs <bank_code> <YYYY-MM-DD> <amount> <category> [sub_category]");
    }

    let date = NaiveDate::parse_from_str(&args[1], "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {}", args[1]))?;
    let amount = parse_amount(&args[2])?;
    let sub_category = args.get(4).cloned().unwrap_or_default();
    let entry = Entry::new(args[0].clone(), args[3].clone(), sub_category, amount, date);

    let mut categories: Categories = PersistentMapping::open(config, CATEGORIES, Vec::new());
    let known = categories.get_or(&entry.category, &Vec::new()).clone();
    if !entry.sub_category.is_empty() && !known.contains(&entry.sub_category) {
        let mut subs = known;
        subs.push(entry.sub_category.clone());
        subs.sort();
        categories.set(entry.category.clone(), subs);
    } else if !categories.contains(&entry.category) {
        categories.set(entry.category.clone(), known);
    }

    let mut entries = open_entries(config);
    if entries.add(entry) {
        println!("✓ Entry added ({} total)", entries.len());
    } else {
        println!("⚠️  Duplicate entry (same bank code, date and amount) - not added");
    }

    entries.save().context("Failed to save entries")?;
    categories
        .save_to_disk()
        .context("Failed to save categories")?;

    Ok(())
}

/// Amounts must be finite: NaN and infinities cannot be stored as JSON numbers
fn parse_amount(raw: &str) -> Result<f64> {
    let amount: f64 = raw
        .parse()
        .with_context(|| format!("Invalid amount: {}", raw))?;
    if !amount.is_finite() {
        bail!("Invalid amount: {} (must be a finite number)", raw);
    }
    Ok(amount)
}

fn run_categories(config: &StoreConfig) -> Result<()> {
    let categories: Categories = PersistentMapping::open(config, CATEGORIES, Vec::new());

    let mut names: Vec<&String> = categories.keys().collect();
    names.sort();

    println!("🏷️  {} categories", names.len());
    for name in names {
        let subs = categories.get(name)?;
        println!("  {}: {}", name, subs.join(", "));
    }

    Ok(())
}
