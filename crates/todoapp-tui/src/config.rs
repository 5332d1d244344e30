use std::path::PathBuf;

use clap::Parser;
use todoapp_core::SortOrder;
use todoapp_store::StoreConfig;

const LOG_FILE_NAME: &str = "todoapp.log";

#[derive(Debug, Parser)]
#[command(name = "todoapp", about = "Terminal to-do list")]
pub struct Config {
    /// Directory holding todos.json (defaults to the platform data dir)
    #[arg(long, env = "TODOAPP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log file. The terminal is owned by the UI, so logs never go to stderr.
    #[arg(long, env = "TODOAPP_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Direction the first sort applies: asc or desc. Until then the list
    /// keeps its stored order.
    #[arg(long, value_parser = parse_sort_order, default_value = "asc")]
    pub sort: SortOrder,

    /// Insert a few sample tasks when the list is empty
    #[arg(long)]
    pub seed_samples: bool,
}

impl Config {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            data_dir: self.data_dir.clone(),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.store_config().data_dir().join(LOG_FILE_NAME))
    }
}

fn parse_sort_order(s: &str) -> Result<SortOrder, String> {
    SortOrder::from_str(&s.to_lowercase()).ok_or_else(|| format!("expected asc or desc, got {s}"))
}
