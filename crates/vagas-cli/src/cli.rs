use clap::Parser;
use std::path::PathBuf;
use vagas_core::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "vagas", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Number of result pages to read
    #[arg(long, short = 'p')]
    pub pages: Option<u32>,

    /// Spreadsheet that accumulates the listings
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Scrape and summarise without touching the spreadsheet
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Resolve the effective configuration: file, then environment, then flags.
    pub fn load_config(&self) -> vagas_core::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(pages) = self.pages {
            config.scraper.max_pages = pages;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if self.headed {
            config.browser.headless = false;
        }
    }
}
