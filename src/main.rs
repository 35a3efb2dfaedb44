use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use codeloader::config::{load_config_file, CodeLoaderConfig};
use codeloader::{load_highlighted, logging, Highlighter};
use tracing::debug;

/// Output file used when stdout is a terminal and `--output` is not given
const DEFAULT_OUTPUT_FILE: &str = "codeloader_output.html";

fn cli() -> Command {
    Command::new("codeloader")
        .version(env!("CARGO_PKG_VERSION"))
        .about("codeloader: reads a source file and renders it as syntax-highlighted HTML.")
        .arg(
            Arg::new("asset")
                .help("Source file to highlight (default: src/assets/code/planus-leo.ts.txt)")
                .required(false),
        )
        .arg(
            Arg::new("language")
                .short('l')
                .long("language")
                .value_name("LANG")
                .help("Language tag or file extension (default: typescript)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output HTML file name (default: codeloader_output.html if not streaming)"),
        )
        .arg(
            Arg::new("syntax-dir")
                .long("syntax-dir")
                .value_name("DIR")
                .help("Directory of extra .sublime-syntax grammars"),
        )
        .arg(
            Arg::new("prefixed")
                .long("prefixed")
                .help("Prefix every CSS class with hl-")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("css")
                .long("css")
                .value_name("THEME")
                .num_args(0..=1)
                .help("Print the stylesheet for THEME instead of highlighting"),
        )
        .arg(
            Arg::new("list-themes")
                .long("list-themes")
                .help("Print the bundled theme names")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
}

/// Fold CLI flags over the config file; flags win.
fn apply_overrides(mut config: CodeLoaderConfig, matches: &ArgMatches) -> CodeLoaderConfig {
    if let Some(asset) = matches.get_one::<String>("asset") {
        config.asset = PathBuf::from(asset);
    }
    if let Some(language) = matches.get_one::<String>("language") {
        config.language = language.clone();
    }
    if let Some(dir) = matches.get_one::<String>("syntax-dir") {
        config.syntax_dir = Some(PathBuf::from(dir));
    }
    if matches.get_flag("prefixed") {
        config.prefixed_classes = true;
    }
    if let Some(theme) = matches.get_one::<String>("css") {
        config.theme = theme.clone();
    }
    config
}

fn build_highlighter(config: &CodeLoaderConfig) -> Result<Highlighter> {
    let highlighter = match &config.syntax_dir {
        Some(dir) => Highlighter::with_syntax_dir(dir)?,
        None => Highlighter::new(),
    };
    Ok(highlighter.prefixed(config.prefixed_classes))
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    logging::init(matches.get_flag("debug"));

    // Load optional YAML config, then let flags override it
    let config = load_config_file(Path::new("."))?.unwrap_or_default();
    let config = apply_overrides(config, &matches);
    debug!(?config, "effective config");

    let highlighter = build_highlighter(&config)?;

    if matches.get_flag("list-themes") {
        for name in highlighter.theme_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    if matches.contains_id("css") {
        let css = highlighter.css(&config.theme)?;
        return write_stdout(&css);
    }

    let highlighted = load_highlighted(&config.asset, &config.language, &highlighter).await?;
    debug!(grammar = %highlighted.language, "highlighted {}", config.asset.display());

    // Piped output gets the raw fragment, a terminal gets a file
    let streaming = !atty::is(atty::Stream::Stdout);
    if streaming {
        return write_stdout(&highlighted.html);
    }

    let output_file = matches
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_OUTPUT_FILE);
    {
        let mut f = BufWriter::new(File::create(output_file)?);
        f.write_all(highlighted.html.as_bytes())?;
        f.flush()?;
    }
    println!("HTML exported to {}", output_file);

    Ok(())
}

fn write_stdout(text: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(text.as_bytes())?;
    handle.flush()?;
    Ok(())
}
