use anyhow::{bail, Result};
use clap::Parser;
use client_core::{derive_visible, fetch_batch, CharacterApi, DEFAULT_BATCH_SIZE};
use shared::domain::{SortKey, StatusFilter};
use url::Url;

/// Fetch a character batch from the collection endpoint and print it.
#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "https://rickandmortyapi.com/api/character")]
    base_url: String,
    #[arg(long, default_value_t = 1)]
    start_page: u32,
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    count: usize,
    /// Case-insensitive name filter.
    #[arg(long)]
    search: Option<String>,
    /// Exact status match, e.g. "Alive", "Dead" or "unknown".
    #[arg(long)]
    status: Option<String>,
    /// Sort column: name, status or species.
    #[arg(long)]
    sort: Option<String>,
    /// Print JSON instead of an aligned table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let sort_key = match cli.sort.as_deref() {
        None => None,
        Some(s) if s.eq_ignore_ascii_case("name") => Some(SortKey::Name),
        Some(s) if s.eq_ignore_ascii_case("status") => Some(SortKey::Status),
        Some(s) if s.eq_ignore_ascii_case("species") => Some(SortKey::Species),
        Some(other) => bail!("unknown sort column '{other}'"),
    };
    let status_filter = match cli.status {
        None => StatusFilter::All,
        Some(status) => StatusFilter::Only(status),
    };

    let api = CharacterApi::new(Url::parse(&cli.base_url)?);
    let batch = fetch_batch(&api, cli.start_page, cli.count).await?;
    let visible = derive_visible(
        &batch,
        cli.search.as_deref().unwrap_or(""),
        &status_filter,
        sort_key,
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    let name_width = visible.iter().map(|c| c.name.len()).max().unwrap_or(0).max(4);
    let status_width = visible.iter().map(|c| c.status.len()).max().unwrap_or(0).max(6);
    println!("{:>5}  {:<name_width$}  {:<status_width$}  species", "id", "name", "status");
    for character in &visible {
        println!(
            "{:>5}  {:<name_width$}  {:<status_width$}  {}",
            character.id.0, character.name, character.status, character.species
        );
    }
    println!("{} of {} fetched characters shown", visible.len(), batch.len());
    Ok(())
}
