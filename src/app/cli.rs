use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Concatenate a project's source files into a single text file"
)]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Output file, relative to the current directory
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Extra extensions (".proto") or exact file names ("Justfile") to include
    #[arg(long, num_args = 1..)]
    pub include: Option<Vec<String>>,

    /// Extra directory names (or globs like "*.egg-info") to skip entirely
    #[arg(long, num_args = 1..)]
    pub exclude_dir: Option<Vec<String>>,

    /// Extra extensions to reject even when they are included
    #[arg(long, num_args = 1..)]
    pub exclude_ext: Option<Vec<String>>,

    /// Extra exact file names to reject
    #[arg(long, num_args = 1..)]
    pub exclude_file: Option<Vec<String>>,

    /// Start from empty filter sets instead of the built-in defaults
    #[arg(long)]
    pub no_defaults: bool,

    /// Also honour .gitignore and .ignore files
    #[arg(long)]
    pub gitignore: bool,
}
