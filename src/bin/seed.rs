// src/bin/seed.rs
// Seeds the crop and gallery collections straight into the database,
// with the same empty-collection rule as the /seed endpoints.
use anyhow::Context;
use dotenv::dotenv;
use std::time::Instant;
use taxfarm_api::config::{init_db_pool, Config};
use taxfarm_api::errors::ApiError;
use taxfarm_api::services::{CropService, GalleryService};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

#[derive(Debug)]
enum SeedOutcome {
    Seeded(usize),
    AlreadySeeded,
    Failed(String),
}

#[derive(Debug)]
struct SeedResult {
    collection: &'static str,
    outcome: SeedOutcome,
    duration_secs: f64,
}

impl SeedResult {
    fn from_result<T>(collection: &'static str, started: Instant, result: Result<Vec<T>, ApiError>) -> Self {
        let outcome = match result {
            Ok(records) => SeedOutcome::Seeded(records.len()),
            Err(ApiError::AlreadyExists(_)) => SeedOutcome::AlreadySeeded,
            Err(e) => SeedOutcome::Failed(e.to_string()),
        };
        SeedResult {
            collection,
            outcome,
            duration_secs: started.elapsed().as_secs_f64(),
        }
    }
}

fn print_summary(results: &[SeedResult]) {
    println!("\n{}📋 Seed Summary{}", BOLD, RESET);
    println!("──────────────────────────────────────────────────────────");
    println!("{:<20} {:<30} {:>8}", "Collection", "Result", "Duration");
    println!("──────────────────────────────────────────────────────────");

    for res in results {
        let (color, text) = match &res.outcome {
            SeedOutcome::Seeded(count) => (GREEN, format!("✅ {} records inserted", count)),
            SeedOutcome::AlreadySeeded => (YELLOW, "⏭️  already populated".to_string()),
            SeedOutcome::Failed(reason) => (RED, format!("❌ {}", reason)),
        };
        println!(
            "{:<20} {}{:<30}{} {:>7.2}s",
            res.collection, color, text, RESET, res.duration_secs
        );
    }
    println!("──────────────────────────────────────────────────────────");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;

    println!("{}🌱 TaxFarm database seeder{}", CYAN, RESET);

    let pool = init_db_pool(&config)
        .await
        .context("failed to connect to the database")?;

    let started = Instant::now();
    let crops = SeedResult::from_result("crops", started, CropService::seed_crops(&pool).await);

    let started = Instant::now();
    let gallery = SeedResult::from_result(
        "gallery_images",
        started,
        GalleryService::seed_images(&pool).await,
    );

    let results = [crops, gallery];
    print_summary(&results);
    pool.close().await;

    if let Some(failed) = results
        .iter()
        .find(|r| matches!(r.outcome, SeedOutcome::Failed(_)))
    {
        anyhow::bail!("seeding {} failed", failed.collection);
    }

    println!("\n{}✨ Done{}", GREEN, RESET);
    Ok(())
}
