//! Argument parsing and the generate command.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use tracing::info;

use southpark_core::{CatalogScraper, ClientConfig, Region, ScraperConfig, store};

#[derive(Parser, Debug)]
#[command(name = "southpark-catalog")]
#[command(about = "Generates South Park addon catalogs from the regional sites")]
#[command(version)]
#[command(group(
    ArgGroup::new("region")
        .required(true)
        .args(["en", "es", "de", "se", "eu", "br", "lat"])
))]
pub struct Cli {
    /// Enable debug output and dump raw page data
    #[arg(long)]
    pub debug: bool,

    /// Update only the last season of the existing catalog
    #[arg(long)]
    pub only_last_season: bool,

    /// Directory holding the catalog files
    #[arg(long, env = "SOUTHPARK_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Language english (north america)
    #[arg(long)]
    en: bool,
    /// Language spanish (north america)
    #[arg(long)]
    es: bool,
    /// Language german (germany)
    #[arg(long)]
    de: bool,
    /// Language swedish (sweden)
    #[arg(long)]
    se: bool,
    /// Language english (europe)
    #[arg(long)]
    eu: bool,
    /// Language portuguese (brazil)
    #[arg(long)]
    br: bool,
    /// Language spanish (latin america)
    #[arg(long)]
    lat: bool,
}

impl Cli {
    /// The region picked by the exclusive region flags
    pub fn region(&self) -> Option<Region> {
        let flags = [
            (self.en, Region::En),
            (self.es, Region::Es),
            (self.de, Region::De),
            (self.se, Region::Se),
            (self.eu, Region::Eu),
            (self.br, Region::Br),
            (self.lat, Region::Lat),
        ];
        flags
            .into_iter()
            .find(|(selected, _)| *selected)
            .map(|(_, region)| region)
    }

    fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            client: ClientConfig {
                timeout_secs: self.timeout,
            },
            debug_dir: self.debug.then(|| self.output_dir.clone()),
            ..ScraperConfig::default()
        }
    }
}

/// Scrape the selected region and write its catalog
pub async fn run(args: Cli) -> anyhow::Result<()> {
    let Some(region) = args.region() else {
        anyhow::bail!("nothing was selected");
    };

    let path = store::catalog_path(&args.output_dir, region);
    let previous = if args.only_last_season {
        let catalog = store::read_catalog(&path)
            .with_context(|| format!("cannot read previous catalog {}", path.display()))?;
        Some(catalog)
    } else {
        None
    };

    let scraper = CatalogScraper::with_config(region.profile(), args.scraper_config())?;
    let catalog = scraper
        .build_catalog(previous)
        .await
        .with_context(|| format!("failed to build catalog for {}", region))?;

    store::write_catalog(&path, &catalog)
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!(
        "wrote {} seasons to {}",
        catalog.seasons.len(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_region_flag() {
        let cli = Cli::try_parse_from(["southpark-catalog", "--de"]).unwrap();
        assert_eq!(cli.region(), Some(Region::De));
        assert!(!cli.debug);
        assert!(!cli.only_last_season);
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn test_region_flag_required() {
        assert!(Cli::try_parse_from(["southpark-catalog", "--debug"]).is_err());
    }

    #[test]
    fn test_region_flags_are_exclusive() {
        assert!(Cli::try_parse_from(["southpark-catalog", "--en", "--es"]).is_err());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "southpark-catalog",
            "--debug",
            "--only-last-season",
            "--output-dir",
            "/tmp/catalogs",
            "--timeout",
            "5",
            "--lat",
        ])
        .unwrap();

        assert_eq!(cli.region(), Some(Region::Lat));
        assert!(cli.only_last_season);

        let config = cli.scraper_config();
        assert_eq!(config.client.timeout_secs, 5);
        assert_eq!(config.debug_dir, Some(PathBuf::from("/tmp/catalogs")));
    }

    #[test]
    fn test_no_debug_dir_without_debug() {
        let cli = Cli::try_parse_from(["southpark-catalog", "--eu"]).unwrap();
        assert!(cli.scraper_config().debug_dir.is_none());
    }
}
