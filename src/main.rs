//! Command-line front end for the catalog, contact and deck services.
//!
//! Data goes to stdout; advisories and logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use wrapweft::catalog::Lookup;
use wrapweft::config::SiteConfig;
use wrapweft::contact::{ContactForm, Inquiry};
use wrapweft::deck::FileSink;
use wrapweft::lifecycle::{setup_tracing, Storefront};
use wrapweft::model::{Advisory, CatalogEntry, CategoryFilter};

#[derive(Parser)]
#[command(name = "wrapweft", version, about = "Wrap Weft & Co catalog tools")]
struct Cli {
    /// TOML config file; environment variables override it.
    #[arg(long, global = true, env = "WRAPWEFT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List collections
    List {
        /// Only this category (Denim, Sustainable, Performance, Lightweight, Workwear)
        #[arg(long, default_value = "All")]
        category: CategoryFilter,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one collection
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// List featured collections
    Featured {
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
    /// Export the company presentation
    Deck {
        /// Output directory (defaults to the configured one)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: Option<String>,
        /// Pre-fill the subject as a swatch request for this collection id
        #[arg(long, conflicts_with_all = ["subject", "spec_sheet"])]
        swatches: Option<String>,
        /// Pre-fill the subject as a spec sheet request for this collection id
        #[arg(long, conflicts_with = "subject")]
        spec_sheet: Option<String>,
        #[arg(long)]
        message: String,
    },
}

fn print_advisory(advisory: Option<&Advisory>) {
    if let Some(advisory) = advisory {
        eprintln!("warning: {advisory} ({})", advisory.detail);
    }
}

fn print_table(entries: &[&CatalogEntry]) {
    for entry in entries {
        let marker = if entry.is_featured() { "*" } else { " " };
        println!("{marker} {:<20} {:<12} {}", entry.id, entry.category, entry.title);
    }
}

async fn subject_for(storefront: &Storefront, inquiry: Inquiry, id: &str) -> Result<String> {
    match storefront.catalog.get_by_id(id).await {
        Lookup::Found(resolved) => Ok(inquiry.subject_for(&resolved.value.title)),
        Lookup::NotFound => bail!("Collection not found: {id}"),
    }
}

async fn run(cli: Cli, storefront: &Storefront) -> Result<()> {
    match cli.command {
        Command::List { category, json } => {
            let all = storefront.catalog.list_all().await;
            print_advisory(all.advisory.as_ref());
            let entries = category.apply(&all.value);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_table(&entries);
            }
        }
        Command::Show { id, json } => match storefront.catalog.get_by_id(&id).await {
            Lookup::Found(resolved) => {
                print_advisory(resolved.advisory.as_ref());
                let entry = resolved.value;
                if json {
                    println!("{}", serde_json::to_string_pretty(&entry)?);
                } else {
                    println!("{} ({})", entry.title, entry.category);
                    println!();
                    println!("{}", entry.long_description);
                    println!();
                    for feature in &entry.features {
                        println!("  - {feature}");
                    }
                    for image in entry.gallery() {
                        println!("  {image}");
                    }
                }
            }
            Lookup::NotFound => bail!("Collection not found: {id}"),
        },
        Command::Featured { limit } => {
            let featured = storefront.catalog.list_featured(limit).await;
            print_advisory(featured.advisory.as_ref());
            print_table(&featured.value.iter().collect::<Vec<_>>());
        }
        Command::Deck { out } => {
            let deck = match out {
                Some(dir) => storefront.deck.clone().with_sink(Arc::new(FileSink::new(dir))),
                None => storefront.deck.clone(),
            };
            let export = deck.export().await.context("Deck export failed")?;
            print_advisory(export.advisory.as_ref());
            println!("{}", export.location.display());
        }
        Command::Contact {
            first_name,
            last_name,
            email,
            subject,
            swatches,
            spec_sheet,
            message,
        } => {
            let subject = match (swatches, spec_sheet) {
                (Some(id), _) => Some(subject_for(storefront, Inquiry::RequestSwatches, &id).await?),
                (_, Some(id)) => Some(subject_for(storefront, Inquiry::SpecSheet, &id).await?),
                _ => subject,
            };
            let mut form = ContactForm::prefilled(subject.as_deref());
            form.first_name = first_name;
            form.last_name = last_name;
            form.email = email;
            form.message = message;

            let missing = form.missing_fields();
            if !missing.is_empty() {
                bail!("Missing required fields: {}", missing.join(", "));
            }

            let outcome = storefront.contact.submit(&form.into_lead()).await?;
            print_advisory(outcome.advisory());
            println!("{}", outcome.user_message());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config = SiteConfig::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    let storefront = Storefront::from_config(&config).context("Failed to set up remote store")?;
    info!(remote = storefront.catalog.is_remote_configured(), "Storefront ready");

    let result = run(cli, &storefront).await;
    storefront.shutdown().await.map_err(anyhow::Error::msg)?;
    result
}
