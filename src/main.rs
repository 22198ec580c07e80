//! Command line entry point for the translation plugin.

use std::io::Write as _;
use std::path::PathBuf;

use clap::{
    Parser,
    ValueEnum,
};
use wiki_translation::config::ConfigManager;
use wiki_translation::locale::DirectoryLocaleSource;
use wiki_translation::plugin::{
    Output,
    TranslationArgs,
};
use wiki_translation::wiki::{
    CachedPageStore,
    DirectoryPageStore,
};
use wiki_translation::{
    TranslationResolver,
    WikiTranslation,
};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "wiki-translation", version, about = "Translate wiki page names and strings")]
struct Cli {
    /// Wiki root holding `.wiki-translation.json`.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Plugin arguments (`languages=de,fr`, `string=HomePage`, `what=wikiwords`, ...).
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .init();

    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(cli.root))?;
    let settings = config_manager.get_settings();

    let source = DirectoryLocaleSource::new(&settings.locale_dir)
        .with_key_separator(&settings.key_separator)
        .with_excluded(settings.excluded_locale_dirs.clone());
    let mut resolver = TranslationResolver::with_languages(
        source,
        &settings.canonical_language,
        &settings.default_language,
    );
    let pages = CachedPageStore::new(DirectoryPageStore::new(&settings.pgsrc_dir));

    let args = TranslationArgs::parse(&cli.args)?;
    let output = WikiTranslation::new(settings).run(&mut resolver, &pages, &args)?;

    let mut stdout = std::io::stdout().lock();
    match cli.format {
        Format::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(&output)?)?,
        Format::Text => match output {
            Output::Text(text) | Output::Redirect(text) | Output::Message(text) => {
                writeln!(stdout, "{text}")?;
            }
            Output::Matrix(matrix) => write!(stdout, "{}", matrix.render_text())?,
        },
    }
    Ok(())
}
