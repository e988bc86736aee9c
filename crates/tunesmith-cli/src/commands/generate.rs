//! Generate command implementation
//!
//! Builds a request from flags, resolves the engine config, and prints the
//! style prompt.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tunesmith_llm::Orchestrator;
use tunesmith_spec::{GenerationOutput, GenerationRequest, TraceRun, TunesmithError};

use super::config_store;
use crate::config::{process_env, resolve, Overrides};
use crate::store::ConfigStore;

/// Arguments for `tunesmith generate`.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Free-text description of the music
    pub description: String,

    /// Genre override, possibly compound ("jazz rock", "lofi/hiphop")
    #[arg(short, long)]
    pub genre: Option<String>,

    /// RNG seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Emit a MAX-mode prompt
    #[arg(long)]
    pub max: bool,

    /// Also write lyrics (requires a provider)
    #[arg(long)]
    pub lyrics: bool,

    /// Include style tag and recording lines in standard mode
    #[arg(long)]
    pub suno_tags: bool,

    /// Phrase that must appear verbatim as the last line
    #[arg(long, value_name = "PHRASE")]
    pub lock: Option<String>,

    /// LLM provider (groq, openai, anthropic)
    #[arg(long)]
    pub provider: Option<String>,

    /// Model id for the provider
    #[arg(long)]
    pub model: Option<String>,

    /// Never call an LLM, even when a provider is configured
    #[arg(long, conflicts_with_all = ["provider", "model", "stream"])]
    pub offline: bool,

    /// Print the model's text to stderr as it arrives
    #[arg(long)]
    pub stream: bool,

    /// Write the decision trace to this file or directory
    #[arg(long, value_name = "PATH")]
    pub trace_out: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// The generation request these flags describe.
    pub fn request(&self) -> GenerationRequest {
        let mut builder = GenerationRequest::builder(self.description.clone())
            .max_mode(self.max)
            .lyrics_mode(self.lyrics)
            .suno_tags(self.suno_tags);
        if let Some(genre) = &self.genre {
            builder = builder.genre(genre.clone());
        }
        if let Some(phrase) = &self.lock {
            builder = builder.locked_phrase(phrase.clone());
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            provider: self.provider.clone(),
            model: self.model.clone(),
            offline: self.offline,
        }
    }
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 validation error, 2 generation error
pub fn run(args: &GenerateArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    execute(args, config_path).map(ExitCode::from)
}

fn execute(args: &GenerateArgs, config_path: Option<&Path>) -> Result<u8> {
    let store = config_store(config_path)?;
    let file = store
        .load()
        .with_context(|| format!("failed to load config from {}", store.path().display()))?;
    let resolved = resolve(&file, process_env, &args.overrides())?;
    let orchestrator =
        Orchestrator::from_config(resolved.engine).context("failed to build the LLM client")?;

    let request = args.request();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let result = runtime.block_on(async {
        if args.stream && !args.json {
            let mut observer = |chunk: &str| {
                let mut stderr = std::io::stderr().lock();
                let _ = write!(stderr, "{}", chunk.dimmed());
                let _ = stderr.flush();
            };
            let result = orchestrator.generate_streaming(&request, &mut observer).await;
            eprintln!();
            result
        } else {
            orchestrator.generate(&request).await
        }
    });

    let output = match result {
        Ok(output) => output,
        Err(TunesmithError::Validation(errors)) => {
            for error in &errors {
                eprintln!("{}: {}", "invalid request".red(), error);
            }
            return Ok(1);
        }
        Err(TunesmithError::Generation(e)) => {
            eprintln!("{}: {}", "generation failed".red(), e);
            return Ok(2);
        }
    };

    if let Some(path) = &args.trace_out {
        write_trace(&output, path)?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&output).context("failed to serialize output")?;
        println!("{}", json);
    } else {
        print_human(&output);
    }
    Ok(0)
}

fn print_human(output: &GenerationOutput) {
    if let Some(title) = &output.title {
        eprint!("{} {}", "Title:".bold(), title.cyan());
        match &output.debug_info {
            Some(trace) => eprintln!(" {}", format!("(seed {})", trace.rng.seed).dimmed()),
            None => eprintln!(),
        }
    }
    println!("{}", output.text);
    if let Some(lyrics) = &output.lyrics {
        println!();
        println!("{}", lyrics);
    }
}

/// Writes the trace to `path`, or to `<path>/tunesmith-<seed>.trace.json` when
/// `path` is a directory. Returns the file written, if any.
pub fn write_trace(output: &GenerationOutput, path: &Path) -> Result<Option<PathBuf>> {
    let Some(trace) = &output.debug_info else {
        tracing::warn!("tracing is disabled; no trace written");
        return Ok(None);
    };
    let target = if path.is_dir() {
        path.join(TraceRun::filename(trace.rng.seed))
    } else {
        path.to_path_buf()
    };
    let json = trace.to_json_pretty().context("failed to serialize trace")?;
    std::fs::write(&target, json)
        .with_context(|| format!("failed to write trace to {}", target.display()))?;
    tracing::info!(path = %target.display(), "trace written");
    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tunesmith_llm::{EngineConfig, ScriptedClient};

    fn args(description: &str) -> GenerateArgs {
        GenerateArgs {
            description: description.to_string(),
            ..GenerateArgs::default()
        }
    }

    async fn offline_output(request: &GenerationRequest) -> GenerationOutput {
        Orchestrator::<ScriptedClient>::without_client(EngineConfig::offline())
            .generate(request)
            .await
            .unwrap()
    }

    #[test]
    fn test_request_from_flags() {
        let args = GenerateArgs {
            genre: Some("jazz rock".into()),
            seed: Some(9),
            max: true,
            suno_tags: true,
            lock: Some("Hold the line".into()),
            ..args("late night drive")
        };
        let request = args.request();
        assert_eq!(request.description, "late night drive");
        assert_eq!(request.genre_override(), Some("jazz rock"));
        assert_eq!(request.seed, Some(9));
        assert!(request.max_mode);
        assert!(!request.lyrics_mode);
        assert!(request.use_suno_tags);
        assert_eq!(request.locked_phrase(), Some("Hold the line"));
    }

    #[tokio::test]
    async fn test_write_trace_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let request = GenerateArgs {
            seed: Some(1234),
            ..args("smooth jazz night session")
        }
        .request();
        let output = offline_output(&request).await;

        let written = write_trace(&output, dir.path()).unwrap().unwrap();
        assert_eq!(written, dir.path().join("tunesmith-1234.trace.json"));

        let trace = TraceRun::from_json(&std::fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(trace.rng.seed, 1234);
    }

    #[tokio::test]
    async fn test_write_trace_to_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("run.json");
        let request = args("dark techno warehouse").request();
        let output = offline_output(&request).await;
        assert_eq!(write_trace(&output, &target).unwrap(), Some(target.clone()));
        assert!(target.exists());
    }

    #[test]
    fn test_run_offline_with_temp_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let args = GenerateArgs {
            seed: Some(42),
            offline: true,
            trace_out: Some(dir.path().to_path_buf()),
            ..args("smooth jazz night session")
        };
        assert_eq!(execute(&args, Some(&config)).unwrap(), 0);
        assert!(dir.path().join("tunesmith-42.trace.json").exists());
    }

    #[test]
    fn test_run_rejects_empty_description() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let args = GenerateArgs {
            offline: true,
            ..args("   ")
        };
        assert_eq!(execute(&args, Some(&config)).unwrap(), 1);
    }
}
