//! Command-line interface for the `layerconf` binary.

use clap::{Args, Parser, Subcommand};
use layerconf::{
    DotEnvFile, EnvFileSource, FileLocator, ManifestDocument, ManifestSource, ResolutionRequest,
    resolve,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(
    name = "layerconf",
    version,
    about = "Resolve configuration values from overrides, .env files and manifests"
)]
pub(crate) struct Cli {
    /// Log resolution steps to stderr
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Resolve a key and print its value
    Resolve(ResolveArgs),
    /// Print the entries of a .env file
    Env(EnvArgs),
    /// Print the sections and entries of a manifest
    Manifest(ManifestArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ResolveArgs {
    /// Key to resolve
    key: String,

    /// Override value; the first non-empty one wins
    #[arg(long = "override", value_name = "VALUE")]
    overrides: Vec<String>,

    /// Environment variable consulted after the --override values
    #[arg(long = "override-env", value_name = "VAR")]
    override_env: Vec<String>,

    /// .env file to consult
    #[arg(long, value_name = "PATH", env = "LAYERCONF_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Directory to search for .env (then its parent); takes precedence over --env-file
    #[arg(long, value_name = "DIR")]
    env_dir: Option<PathBuf>,

    /// Key to look up in the .env file instead of KEY
    #[arg(long, value_name = "KEY")]
    env_key: Option<String>,

    /// Manifest file to consult; ignored without --section
    #[arg(long, value_name = "PATH", env = "LAYERCONF_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Manifest section holding the key
    #[arg(long, value_name = "NAME", requires = "manifest")]
    section: Option<String>,

    /// Key to look up in the manifest instead of KEY
    #[arg(long, value_name = "KEY")]
    manifest_key: Option<String>,

    /// Print the resolved value and its source as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EnvArgs {
    /// .env file to print
    #[arg(conflicts_with = "dir")]
    path: Option<PathBuf>,

    /// Directory to search for .env (then its parent); defaults to the current directory
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ManifestArgs {
    /// Manifest file to print
    path: PathBuf,

    /// Only print this section
    #[arg(long, value_name = "NAME")]
    section: Option<String>,
}

#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] layerconf::Error),

    #[error("{} not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("section [{section}] not found in {}", .path.display())]
    SectionNotFound { path: PathBuf, section: String },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// 1 for "nothing found", 2 for everything else.
    pub(crate) fn exit_code(&self) -> u8 {
        match self {
            Self::Config(e) if e.is_not_found() => 1,
            Self::FileNotFound(_) | Self::SectionNotFound { .. } => 1,
            _ => 2,
        }
    }
}

pub(crate) fn run(command: Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Resolve(args) => run_resolve(args, out),
        Command::Env(args) => run_env(args, out),
        Command::Manifest(args) => run_manifest(args, out),
    }
}

fn build_request(args: ResolveArgs) -> ResolutionRequest {
    let mut request = ResolutionRequest::new(args.key);

    for (idx, value) in args.overrides.into_iter().enumerate() {
        request = request.with_override(format!("--override #{}", idx + 1), Some(value));
    }
    for var in args.override_env {
        request = request.with_env_override(var);
    }

    // --env-file may come from LAYERCONF_ENV_FILE, so an explicit --env-dir wins
    let env_source = match (args.env_dir, args.env_file) {
        (Some(dir), file) => {
            if let Some(file) = file {
                tracing::debug!("--env-dir given, ignoring env file {}", file.display());
            }
            Some(EnvFileSource::located(&FileLocator::new(dir)))
        }
        (None, Some(path)) => Some(EnvFileSource::new(path)),
        (None, None) => None,
    };
    if let Some(mut source) = env_source {
        source.key = args.env_key;
        request = request.with_env_file_source(source);
    }

    match (args.manifest, args.section) {
        (Some(path), Some(section)) => {
            let mut source = ManifestSource::new(path, section);
            source.key = args.manifest_key;
            request = request.with_manifest_source(source);
        }
        (Some(path), None) => {
            tracing::warn!("No --section given, skipping manifest {}", path.display());
        }
        _ => {}
    }

    request
}

fn run_resolve(args: ResolveArgs, out: &mut impl Write) -> Result<(), CliError> {
    let json = args.json;
    let resolved = resolve(&build_request(args))?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&resolved)?)?;
    } else {
        writeln!(out, "{}", resolved.as_str())?;
    }
    Ok(())
}

fn run_env(args: EnvArgs, out: &mut impl Write) -> Result<(), CliError> {
    let path = match args.path {
        Some(path) => path,
        None => {
            let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
            let locator = FileLocator::new(&dir);
            locator
                .locate_dotenv()
                .ok_or_else(|| CliError::FileNotFound(dir.join(layerconf::DOTENV_FILE_NAME)))?
        }
    };

    let env = load_required(&path, DotEnvFile::load)?;
    for entry in &env {
        writeln!(out, "{}={}", entry.key, entry.value)?;
    }
    Ok(())
}

fn run_manifest(args: ManifestArgs, out: &mut impl Write) -> Result<(), CliError> {
    let doc = load_required(&args.path, ManifestDocument::load)?;

    let sections: Vec<_> = match &args.section {
        Some(name) => {
            let section = doc
                .section(name)
                .ok_or_else(|| CliError::SectionNotFound {
                    path: args.path.clone(),
                    section: name.clone(),
                })?;
            vec![section]
        }
        None => doc.sections().collect(),
    };

    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        writeln!(out, "[{}]", section.name())?;
        for entry in section.iter() {
            writeln!(out, "{} = \"{}\"", entry.key, escape_basic(&entry.value))?;
        }
    }
    Ok(())
}

/// Escapes `\` and `"` so the value reads back as a TOML basic string.
fn escape_basic(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn load_required<T>(
    path: &Path,
    load: impl FnOnce(&Path) -> layerconf::Result<Option<T>>,
) -> Result<T, CliError> {
    load(path)?.ok_or_else(|| CliError::FileNotFound(path.to_path_buf()))
}
