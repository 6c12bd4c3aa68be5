//! Configuration and CLI argument handling

use std::{path::PathBuf, sync::Arc};
use clap::Parser;

use crate::{
    services::{PhaseNotifier, Silent, TerminalBell},
    storage::{default_data_file, FileStore, KeyValueStore, MemoryStore, Persistence},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-suite")]
#[command(about = "A local productivity daemon: pomodoro timer, to-do list, kanban board and flip clock")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Storage file (defaults to ~/.config/focus-suite/storage.json)
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,

    /// Keep all data in memory only
    #[arg(long, conflicts_with = "data_file")]
    pub ephemeral: bool,

    /// Do not chime when a phase completes
    #[arg(long)]
    pub no_sound: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Where widget data is stored, unless running ephemeral
    pub fn data_file(&self) -> Option<PathBuf> {
        if self.ephemeral {
            None
        } else {
            Some(self.data_file.clone().unwrap_or_else(default_data_file))
        }
    }

    /// Build the persistence adapter this configuration asks for
    pub fn persistence(&self) -> Persistence {
        let store: Arc<dyn KeyValueStore> = match self.data_file() {
            Some(path) => Arc::new(FileStore::open(path)),
            None => Arc::new(MemoryStore::new()),
        };
        Persistence::new(store)
    }

    /// Build the phase-complete chime
    pub fn notifier(&self) -> Arc<dyn PhaseNotifier> {
        if self.no_sound {
            Arc::new(Silent)
        } else {
            Arc::new(TerminalBell)
        }
    }
}
