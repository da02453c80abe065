//! layerconf CLI - Command-line interface for layered configuration loading
//!
//! Usage:
//!   layerconf dump config.yaml
//!   layerconf get config.yaml database.host
//!   layerconf merge base.yaml override.yaml
//!   layerconf check config.yaml

use clap::{Parser, Subcommand};
use colored::Colorize;
use layerconf_core::{merge, Loader, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// layerconf - layered configuration loading with include resolution
#[derive(Parser)]
#[command(name = "layerconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration file, resolve includes, and print the merged result
    Dump {
        /// Configuration file to load
        file: PathBuf,

        /// Root directory for include resolution (defaults to the file's directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Output format: yaml, json
        #[arg(short, long, default_value = "yaml")]
        format: String,

        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Get a specific value from the loaded configuration
    Get {
        /// Configuration file to load
        file: PathBuf,

        /// Path to the value (e.g., database.host)
        path: String,

        /// Root directory for include resolution (defaults to the file's directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Output format: text, json, yaml
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Default value if the path is not found
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Merge configuration files left to right (earlier files are defaults)
    Merge {
        /// Configuration files to merge
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: yaml, json
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Quick syntax check
    Check {
        /// Configuration file(s) to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Run the CLI with the given arguments
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            file,
            root,
            format,
            output,
        } => cmd_dump(&file, root, &format, output),

        Commands::Get {
            file,
            path,
            root,
            format,
            default,
        } => cmd_get(&file, &path, root, &format, default),

        Commands::Merge { files, format } => cmd_merge(&files, &format),

        Commands::Check { files } => cmd_check(&files),
    }
}

/// Split a file argument into (include root, filename) and load it.
fn load_file(file: &Path, root: Option<PathBuf>) -> Result<Value, String> {
    let root = root.unwrap_or_else(|| {
        file.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("Not a file path: {}", file.display()))?;

    Loader::new()
        .load_file(&root, filename)
        .map_err(|e| format!("Failed to load {}: {}", file.display(), e))
}

fn render(value: &Value, format: &str) -> Result<String, String> {
    match format {
        "json" => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        "yaml" => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        other => Err(format!("Unknown format: {} (expected yaml or json)", other)),
    }
}

fn emit(content: &str, output: Option<PathBuf>) -> ExitCode {
    if let Some(output_path) = output {
        if let Err(e) = std::fs::write(&output_path, content) {
            eprintln!("{}: {}", "Error writing file".red(), e);
            return ExitCode::from(2);
        }
        eprintln!("{} Wrote to {}", "✓".green(), output_path.display());
    } else {
        println!("{}", content.trim_end());
    }
    ExitCode::SUCCESS
}

fn cmd_dump(file: &Path, root: Option<PathBuf>, format: &str, output: Option<PathBuf>) -> ExitCode {
    let value = match load_file(file, root) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::from(2);
        }
    };

    match render(&value, format) {
        Ok(content) => emit(&content, output),
        Err(e) => {
            eprintln!("{}", e.red());
            ExitCode::from(2)
        }
    }
}

fn cmd_get(
    file: &Path,
    path: &str,
    root: Option<PathBuf>,
    format: &str,
    default: Option<String>,
) -> ExitCode {
    let value = match load_file(file, root) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::from(2);
        }
    };

    let found = match value.get_path(path) {
        Ok(v) => v.clone(),
        Err(e) => match default {
            Some(d) => Value::String(d),
            None => {
                eprintln!("{}", e.to_string().red());
                return ExitCode::from(1);
            }
        },
    };

    let content = match format {
        "text" => Ok(found.to_string()),
        other => render(&found, other),
    };

    match content {
        Ok(content) => emit(&content, None),
        Err(e) => {
            eprintln!("{}", e.red());
            ExitCode::from(2)
        }
    }
}

fn cmd_merge(files: &[PathBuf], format: &str) -> ExitCode {
    let mut merged = Value::empty_mapping();

    for file in files {
        let value = match load_file(file, None) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{}", e.red());
                return ExitCode::from(2);
            }
        };
        merged = merge::merge(&merged, &value);
    }

    match render(&merged, format) {
        Ok(content) => emit(&content, None),
        Err(e) => {
            eprintln!("{}", e.red());
            ExitCode::from(2)
        }
    }
}

fn cmd_check(files: &[PathBuf]) -> ExitCode {
    let loader = Loader::new();
    let mut failed = false;

    for file in files {
        let result = std::fs::read_to_string(file)
            .map_err(|e| e.to_string())
            .and_then(|content| loader.load_str(&content).map_err(|e| e.to_string()));

        match result {
            Ok(_) => println!("{} {}", "✓".green(), file.display()),
            Err(e) => {
                failed = true;
                println!("{} {}", "✗".red(), file.display());
                eprintln!("{}", e);
            }
        }
    }

    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
