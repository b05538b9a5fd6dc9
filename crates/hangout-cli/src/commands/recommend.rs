//! Recommendation command.

use clap::Args;
use hangout_core::engine::{RecommendationEngine, SeededRandom};
use hangout_core::{Config, Recommendation, Store};

#[derive(Args)]
pub struct RecommendArgs {
    /// Surface contacts that aren't due yet and relax weekly caps
    #[arg(long)]
    force: bool,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
    /// Seed for reproducible picks (overrides engine.seed)
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: RecommendArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let contacts = store.load_contacts();
    let labels = store.load_labels();
    let settings = store.load_settings();

    let recs = match args.seed.or(config.engine.seed) {
        Some(seed) => {
            let today = chrono::Local::now().date_naive();
            RecommendationEngine::with_rng(today, SeededRandom::new(seed))
                .generate(&contacts, &labels, &settings, args.force)
        }
        None => RecommendationEngine::new().generate(&contacts, &labels, &settings, args.force),
    };

    if args.json || config.output.json {
        println!("{}", serde_json::to_string_pretty(&recs)?);
        return Ok(());
    }

    if recs.is_empty() {
        println!("No recommendations right now.");
        return Ok(());
    }
    for rec in &recs {
        print_recommendation(rec);
    }
    Ok(())
}

fn print_recommendation(rec: &Recommendation) {
    println!(
        "{} ({}) with {} [{}]",
        rec.date,
        rec.date.format("%A"),
        rec.contact.name,
        rec.contact.id
    );
    println!("  {}", rec.reason);
    for activity in &rec.suggested_activities {
        println!("  - {activity}");
    }
}
