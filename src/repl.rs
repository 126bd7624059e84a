//! Read-eval-print loop
//!
//! Reads commands line by line, dispatches them through the registry and keeps
//! going after command errors. Ends on `exit` or end of input.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::commands::{CommandRegistry, Flow, Session};

/// Prompt printed before each line of input
pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it into whitespace-separated words
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Runs the REPL until `exit` or end of input
///
/// # Arguments
/// * `session` - State shared by the commands
/// * `registry` - Commands available to the user
/// * `input` - Source of command lines
/// * `out` - Destination for prompts and command output
///
/// # Returns
/// * `Ok(())` when the session ends normally
/// * `Err` if reading input or writing output fails
pub async fn run<R, W>(
    session: &mut Session,
    registry: &CommandRegistry,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            debug!("end of input, leaving REPL");
            return Ok(());
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = registry.lookup(name).copied() else {
            writeln!(out, "Unknown Command. Type 'help' for command info.")?;
            continue;
        };

        match session.execute(registry, &command, args, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(err) => writeln!(out, "{}", err)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::data::{ApiError, Endpoints, Fetcher};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::BufReader;

    /// Fails every request
    struct OfflineFetcher;

    #[async_trait]
    impl Fetcher for OfflineFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError> {
            Err(ApiError::NotFound(url.to_string()))
        }
    }

    async fn run_script(script: &str) -> String {
        let cache = Cache::new(Duration::from_secs(30)).expect("Cache should build");
        let mut session = Session::new(cache, Arc::new(OfflineFetcher), Endpoints::default());
        let registry = CommandRegistry::standard();
        let mut out = Vec::new();

        run(
            &mut session,
            &registry,
            BufReader::new(script.as_bytes()),
            &mut out,
        )
        .await
        .expect("REPL should not fail on in-memory IO");

        String::from_utf8(out).expect("output should be UTF-8")
    }

    #[test]
    fn test_clean_input() {
        let cases = [
            ("  hello  world  ", vec!["hello", "world"]),
            ("HELLO WORLD", vec!["hello", "world"]),
            ("Charmander Bulbasaur PIKACHU", vec!["charmander", "bulbasaur", "pikachu"]),
            ("\texplore\tpastoria-city-area\n", vec!["explore", "pastoria-city-area"]),
        ];

        for (input, expected) in cases {
            assert_eq!(clean_input(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_clean_input_blank() {
        assert!(clean_input("").is_empty());
        assert!(clean_input("   \t ").is_empty());
    }

    #[tokio::test]
    async fn test_exit_ends_session() {
        let output = run_script("exit\nhelp\n").await;

        assert!(output.starts_with(PROMPT));
        assert!(output.contains("Closing the Pokedex... Goodbye!"));
        assert!(!output.contains("Welcome to the Pokedex!"));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let output = run_script("catch pikachu\n").await;
        assert!(output.contains("Unknown Command. Type 'help' for command info."));
    }

    #[tokio::test]
    async fn test_blank_lines_are_ignored() {
        let output = run_script("\n   \nexit\n").await;

        assert_eq!(output.matches(PROMPT).count(), 3);
        assert!(!output.contains("Unknown Command"));
    }

    #[tokio::test]
    async fn test_commands_are_case_insensitive() {
        let output = run_script("HELP\n").await;
        assert!(output.contains("Welcome to the Pokedex!"));
    }

    #[tokio::test]
    async fn test_command_error_does_not_end_session() {
        let output = run_script("map\nhelp\n").await;

        assert!(output.contains("Resource not found"));
        assert!(output.contains("Welcome to the Pokedex!"));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let output = run_script("mapb\n").await;

        assert!(output.contains("you're on the first page"));
        assert!(output.ends_with(&format!("{}\n", PROMPT)));
    }
}
