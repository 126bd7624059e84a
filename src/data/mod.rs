//! PokeAPI data models
//!
//! This module contains the response types decoded from PokeAPI and the client
//! used to fetch their raw bodies.

pub mod pokeapi;

pub use pokeapi::{is_valid_area_name, ApiError, Endpoints, Fetcher, PokeApiClient, DEFAULT_BASE_URL};

use serde::Deserialize;

/// A name/URL reference to another PokeAPI resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the location-area listing
///
/// `next` and `previous` are absent on the last and first page respectively.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaList {
    /// Total number of location areas across all pages
    #[serde(default)]
    pub count: u32,
    /// URL of the following page
    pub next: Option<String>,
    /// URL of the preceding page
    pub previous: Option<String>,
    /// Location areas on this page
    pub results: Vec<NamedResource>,
}

/// Detail for a single location area
#[derive(Debug, Clone, Deserialize)]
pub struct LocationArea {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

/// A Pokémon that can be encountered in a location area
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

impl LocationArea {
    /// Names of every Pokémon encountered in this area, in API order
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}
