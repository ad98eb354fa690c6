//! Debug script to inspect the embedded page data of a region's season index

use southpark_core::{CatalogScraper, Region, season_urls};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let region: Region = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "en".to_string())
        .parse()?;

    let scraper = CatalogScraper::new(region)?;
    let profile = scraper.profile();

    println!("Fetching {}...\n", profile.index_url());

    let Some(data) = scraper
        .load_page(&profile.index_url(), profile.html_links)
        .await?
    else {
        println!("No embedded page data found");
        return Ok(());
    };

    std::fs::write("debug_page_data.json", serde_json::to_string_pretty(&data)?)?;
    println!("Page data saved to debug_page_data.json");

    println!("\n=== Season pages ===\n");
    for (i, url) in season_urls(&data).iter().enumerate() {
        println!("{:>3}: {}", i + 1, url.as_deref().unwrap_or("(index page)"));
    }

    Ok(())
}
