//! REPL commands and the session state they act on
//!
//! The registry is an explicit table built at startup and handed to the REPL.
//! `Session` holds the pagination cursor and routes every lookup through the
//! response cache before falling back to the fetcher.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::cache::Cache;
use crate::data::{
    is_valid_area_name, ApiError, Endpoints, Fetcher, LocationArea, LocationAreaList,
};

/// Error types for command execution
#[derive(Debug, Error)]
pub enum CommandError {
    /// A required argument was not supplied
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// The area name cannot be used as a URL path segment
    #[error("Invalid location area name: '{0}'")]
    InvalidAreaName(String),

    /// Fetching from the API failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body could not be decoded
    #[error("Failed to parse API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Writing output failed
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// What the REPL should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The available commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Exit,
    Help,
    Map,
    MapBack,
    Explore,
}

/// A registry entry
#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
}

/// Lookup table from command name to command
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Command>,
}

impl CommandRegistry {
    /// Builds the registry with every built-in command
    pub fn standard() -> Self {
        let mut registry = Self::default();
        registry.register(Command {
            name: "exit",
            description: "Exit the Pokedex.",
            kind: CommandKind::Exit,
        });
        registry.register(Command {
            name: "help",
            description: "Prints a help message describing how to use the REPL.",
            kind: CommandKind::Help,
        });
        registry.register(Command {
            name: "map",
            description: "Displays the names of the next 20 location areas in the Pokemon world.",
            kind: CommandKind::Map,
        });
        registry.register(Command {
            name: "mapb",
            description: "Displays the previous 20 location areas.",
            kind: CommandKind::MapBack,
        });
        registry.register(Command {
            name: "explore",
            description: "Lists the Pokemon found in a location area: explore <area>.",
            kind: CommandKind::Explore,
        });
        registry
    }

    /// Adds a command, replacing any command with the same name
    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name, command);
    }

    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Commands in name order
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }
}

/// Per-session state shared by all commands
pub struct Session {
    cache: Cache,
    fetcher: Arc<dyn Fetcher>,
    endpoints: Endpoints,
    /// Page `map` shows next; `None` means start from the first page
    next: Option<String>,
    /// Page `mapb` shows; `None` means the current page is the first
    previous: Option<String>,
}

impl Session {
    pub fn new(cache: Cache, fetcher: Arc<dyn Fetcher>, endpoints: Endpoints) -> Self {
        Self {
            cache,
            fetcher,
            endpoints,
            next: None,
            previous: None,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Runs `command` with `args`, writing user-facing output to `out`
    pub async fn execute<W: Write>(
        &mut self,
        registry: &CommandRegistry,
        command: &Command,
        args: &[String],
        out: &mut W,
    ) -> Result<Flow, CommandError> {
        match command.kind {
            CommandKind::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                Ok(Flow::Exit)
            }
            CommandKind::Help => {
                print_help(registry, out)?;
                Ok(Flow::Continue)
            }
            CommandKind::Map => {
                let url = self
                    .next
                    .clone()
                    .unwrap_or_else(|| self.endpoints.first_page_url());
                self.show_page(&url, out).await?;
                Ok(Flow::Continue)
            }
            CommandKind::MapBack => {
                match self.previous.clone() {
                    Some(url) => self.show_page(&url, out).await?,
                    None => writeln!(out, "you're on the first page")?,
                }
                Ok(Flow::Continue)
            }
            CommandKind::Explore => {
                let area = args.first().ok_or(CommandError::MissingArgument {
                    command: "explore",
                    argument: "location area",
                })?;
                if !is_valid_area_name(area) {
                    return Err(CommandError::InvalidAreaName(area.clone()));
                }
                self.explore(area, out).await?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn show_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<(), CommandError> {
        let body = self.fetch_cached(url).await?;
        let page: LocationAreaList = serde_json::from_slice(&body)?;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        self.next = page.next;
        self.previous = page.previous;
        Ok(())
    }

    async fn explore<W: Write>(&self, area: &str, out: &mut W) -> Result<(), CommandError> {
        writeln!(out, "Exploring {}...", area)?;
        let body = self.fetch_cached(&self.endpoints.area_url(area)).await?;
        let area: LocationArea = serde_json::from_slice(&body)?;

        writeln!(out, "Found Pokemon:")?;
        for name in area.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    /// Returns the cached body for `url`, fetching and caching it on a miss
    async fn fetch_cached(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        if let Some(body) = self.cache.get(url) {
            debug!(%url, "cache hit");
            return Ok(body);
        }

        debug!(%url, "cache miss");
        let body = self.fetcher.fetch(url).await?;
        self.cache.add(url, body.clone());
        Ok(body)
    }
}

fn print_help<W: Write>(registry: &CommandRegistry, out: &mut W) -> io::Result<()> {
    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    for command in registry.iter() {
        writeln!(out, "{}: {}", command.name, command.description)?;
    }
    Ok(())
}
