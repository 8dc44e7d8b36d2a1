use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Result, WrapErr};
use pdfview::environment::{CONFIG_DIR_VAR, VIEWS_DIR_VAR};
use pdfview::{Environment, JsonConfigSource, OptionValue, PdfView};
use pdfview_view::ViewFinder;

/// Render a template view to a PDF file
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// View to render, relative to the views directories (extension optional)
    template: String,

    /// Directory to look up views in; repeat to add fallbacks
    #[clap(long = "views", default_value = "views", env = VIEWS_DIR_VAR)]
    views: Vec<PathBuf>,

    /// Directory holding dompdf.json
    #[clap(long, default_value = "config", env = CONFIG_DIR_VAR)]
    config: PathBuf,

    /// JSON file whose top-level object is bound to the view
    #[clap(long)]
    data: Option<PathBuf>,

    /// Override an engine option, e.g. DOMPDF_DEFAULT_PAPER_SIZE=a4
    #[clap(long = "set", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,

    /// Print the published engine settings after rendering
    #[clap(long)]
    show_settings: bool,

    /// Where to write the PDF
    #[clap(short, long, default_value = "out.pdf")]
    output: PathBuf,
}

fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {arg:?}")),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let env = Arc::new(
        Environment::builder()
            .config_source(JsonConfigSource::new(&cli.config))
            .views(ViewFinder::from_roots(cli.views.clone()))
            .build(),
    );

    let data = match &cli.data {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&contents)
                .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
            match value {
                serde_json::Value::Object(map) => Some(map),
                _ => eyre::bail!("{} must contain a JSON object", path.display()),
            }
        }
        None => None,
    };

    let mut view = PdfView::factory(&env, Some(cli.template.as_str()), data)?;
    for (key, value) in &cli.overrides {
        env.set_option(key, OptionValue::parse_literal(value))?;
    }

    view.render_to_file(&cli.output, None)?;

    if cli.show_settings {
        if let Some(settings) = env.settings() {
            for (name, value) in settings.constants() {
                println!("{name} = {value}");
            }
        }
    }

    tracing::info!(output = %cli.output.display(), "done");
    Ok(())
}
