use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "all_project_code.txt";

pub const DEFAULT_INCLUDE: &[&str] = &[
    // Web frontend
    ".js", ".mjs", ".cjs", ".jsx", ".ts", ".tsx", ".html", ".htm", ".css", ".scss", ".sass",
    ".less", ".vue", ".svelte",
    // Backend
    ".py", ".rb", ".php", ".java", ".go", ".rs", ".c", ".cpp", ".cs", ".h", ".hpp", ".pl", ".ex",
    ".exs", ".kt", ".kts", ".scala", ".r", ".jl", ".dart", ".swift", ".m", ".mm",
    // Shell
    ".sh", ".bash", ".zsh", ".ps1", ".psm1", ".bat", ".cmd", ".lua", ".vbs", ".fish",
    // Query languages
    ".sql", ".graphql", ".gql", ".cypher", ".prisma",
    // Notebooks
    ".ipynb", ".rmd", ".sas", ".mat",
    // Config and serialization
    ".json", ".xml", ".yml", ".yaml", ".toml", ".ini", ".env", ".cfg", ".properties", ".conf",
    // Templates
    ".erb", ".ejs", ".hbs", ".pug", ".j2", ".jinja2", ".twig", ".mustache",
    // Docs
    ".md", ".rst", ".adoc", ".tex", ".txt", ".org", ".asciidoc",
    // DevOps
    "Dockerfile", ".dockerfile", ".gitignore", ".gitattributes", ".editorconfig", ".travis.yml",
    ".circleci", ".gitlab-ci.yml", ".k8s.yaml", ".tf", ".tfvars", ".hcl", ".bicep",
    // Build
    "Makefile", ".makefile", ".mk", ".gradle", ".pom", ".psd1",
];

pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    "node_modules", ".git", "dist", "build", "vendor", "__pycache__", ".vscode", ".idea", "venv",
    ".next", "out", "coverage", "logs", "tmp", "env", ".env", ".pytest_cache", ".mypy_cache",
    ".tox", "target", ".DS_Store", "*.egg-info",
];

pub const DEFAULT_EXCLUDE_EXTENSIONS: &[&str] = &[
    // Media and binaries
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".tiff", ".ico", ".webp", ".svg", ".mp4", ".mp3",
    ".wav", ".avi", ".mov", ".mkv", ".zip", ".tar", ".gz", ".rar", ".7z", ".exe", ".dll", ".bin",
    ".obj", ".so", ".jar", ".class",
    // Compiled Python
    ".pyc", ".pyo",
    // Databases and swap files
    ".db", ".sqlite3", ".swp", ".swo",
    ".lock",
    ".pdf", ".docx",
];

pub const DEFAULT_EXCLUDE_FILES: &[&str] =
    &["package-lock.json", "next-env.d.ts", "yarn.lock", "pnpm-lock.yaml"];

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    include: Option<Vec<String>>,
    exclude_dirs: Option<Vec<String>>,
    exclude_extensions: Option<Vec<String>>,
    exclude_files: Option<Vec<String>>,
    output: Option<PathBuf>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".config")
        .join("code_collect")
        .join("presets.toml"))
}

fn load_presets_from(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {:?}", config_path))?;

    Ok(parsed.presets)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Appends each source in order, dropping repeats but keeping first positions.
fn merge_vecs(sources: [Option<Vec<String>>; 3]) -> Vec<String> {
    let mut combined: Vec<String> = sources.into_iter().flatten().flatten().collect();
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// The built-in filter sets with no presets or CLI additions.
pub fn default_config() -> RuntimeConfig {
    RuntimeConfig {
        include: to_strings(DEFAULT_INCLUDE),
        exclude_dirs: to_strings(DEFAULT_EXCLUDE_DIRS),
        exclude_extensions: to_strings(DEFAULT_EXCLUDE_EXTENSIONS),
        exclude_files: to_strings(DEFAULT_EXCLUDE_FILES),
        output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        respect_gitignore: false,
    }
}

pub fn resolve_config(cli: Cli, project_name: Option<&str>) -> Result<RuntimeConfig> {
    let presets = load_presets_from(&presets_path()?)?;
    Ok(merge_config(cli, project_name, &presets))
}

fn merge_config(
    cli: Cli,
    project_name: Option<&str>,
    presets: &HashMap<String, PresetConfig>,
) -> RuntimeConfig {
    // Preset: CLI flag > root directory name > none
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    let (include, exclude_dirs, exclude_extensions, exclude_files) = if cli.no_defaults {
        (None, None, None, None)
    } else {
        let d = default_config();
        (
            Some(d.include),
            Some(d.exclude_dirs),
            Some(d.exclude_extensions),
            Some(d.exclude_files),
        )
    };

    RuntimeConfig {
        include: merge_vecs([include, preset.include, cli.include]),
        exclude_dirs: merge_vecs([exclude_dirs, preset.exclude_dirs, cli.exclude_dir]),
        exclude_extensions: merge_vecs([
            exclude_extensions,
            preset.exclude_extensions,
            cli.exclude_ext,
        ]),
        exclude_files: merge_vecs([exclude_files, preset.exclude_files, cli.exclude_file]),
        output: cli
            .output
            .or(preset.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        respect_gitignore: cli.gitignore,
    }
}
