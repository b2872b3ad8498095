use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use commonmark_config::Config;
use commonmark_engine::{LinkDefinition, Parser, ParserOptions, ReferenceMap, io, parsing::snapshot};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented outline, one line per block and inline node
    Outline,
    /// Pretty-printed JSON of the same tree
    Json,
}

#[derive(Debug, ClapParser)]
#[command(name = "commonmark")]
#[command(about = "Parse a Markdown document and print its block/inline tree")]
#[command(version)]
struct Args {
    /// Markdown file to parse; omit or pass `-` to read stdin
    file: Option<PathBuf>,

    /// Config file to use instead of ~/.config/commonmark-engine/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Outline)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = load_config(args.config.as_deref())?;
    let parser = build_parser(&config);

    let text = read_input(args.file.as_deref())?;
    let doc = parser.parse(&text);
    log::info!("Parsed {} top-level blocks", doc.blocks().len());

    let snap = snapshot::normalize(&doc);
    match args.format {
        Format::Outline => print!("{snap}"),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&snap).context("Failed to serialize document")?
        ),
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(path) => Config::expand_path(path)
            .with_context(|| format!("Cannot expand config path {}", path.display()))?,
        None => Config::config_path(),
    };
    log::debug!("Config path: {}", config_path.display());

    match Config::load_from_path(&config_path)? {
        Some(config) => Ok(config),
        None if path.is_some() => {
            anyhow::bail!("Config file not found: {}", config_path.display())
        }
        None => {
            log::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn build_parser(config: &Config) -> Parser {
    let options = ParserOptions {
        autolinks: config.autolinks,
        images: config.images,
        reference_links: config.reference_links,
        extra_schemes: config.extra_schemes.clone(),
    };

    let mut references = ReferenceMap::new();
    for (label, entry) in &config.references {
        let definition = LinkDefinition::new(entry.destination.clone(), entry.title.clone());
        if !references.insert(label, definition) {
            log::warn!("Ignoring duplicate reference label {label:?}");
        }
    }
    log::debug!("Loaded {} link references", references.len());

    Parser::new(options).with_references(references)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => io::read_file(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonmark_config::ReferenceEntry;
    use commonmark_engine::InlineNode;
    use tempfile::TempDir;

    #[test]
    fn config_maps_onto_parser() {
        let mut config = Config {
            images: false,
            ..Config::default()
        };
        config.references.insert(
            "Rust".into(),
            ReferenceEntry {
                destination: "https://www.rust-lang.org".into(),
                title: None,
            },
        );

        let parser = build_parser(&config);
        let nodes = parser.parse_inlines("![rust]");

        assert_eq!(parser.references().len(), 1);
        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[1], InlineNode::LinkReference(_)));
    }

    #[test]
    fn extra_schemes_reach_the_autolink_parser() {
        let config = Config {
            extra_schemes: vec!["gemini".into()],
            ..Config::default()
        };
        let nodes = build_parser(&config).parse_inlines("<gemini://x>");
        assert!(matches!(nodes[0], InlineNode::Link(_)));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "autolinks = false\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert!(!config.autolinks);
    }

    #[test]
    fn reads_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.md");
        std::fs::write(&path, "# hi\n").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "# hi\n");
        assert!(read_input(Some(&temp_dir.path().join("nope.md"))).is_err());
    }
}
