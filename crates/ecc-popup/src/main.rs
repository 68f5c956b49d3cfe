use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ecc_popup::config::Settings;
use ecc_popup::popup::tooltip;
use ecc_popup::{PopupFormatter, TranslationUnit, ast};

#[derive(Parser, Debug)]
#[command(name = "ecc-popup", version, about = "Print the info popup for the symbol at a position")]
struct Args {
    /// Source file to inspect.
    file: PathBuf,

    /// 1-based line.
    line: u32,

    /// 1-based column.
    col: u32,

    /// Use an existing `-ast-dump=json` output instead of running clang.
    #[arg(long)]
    ast_json: Option<PathBuf>,

    /// Extra compiler flag, repeatable.
    #[arg(long = "flag", allow_hyphen_values = true)]
    flags: Vec<String>,

    /// Settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override `popup.showTypeBody`.
    #[arg(long)]
    show_type_body: Option<bool>,

    /// Print the HTML completion tooltip instead of the Markdown popup.
    #[arg(long)]
    tooltip: bool,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(
    args: &Args,
    settings: &Settings,
) {
    let directive = if args.verbose {
        "ecc_popup=debug".to_string()
    } else {
        settings.logging.directive()
    };
    let stderr_filter = EnvFilter::new(&directive);
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter);

    let log_file = args.log_file.as_ref().or(settings.logging.file.as_ref());
    let file_layer = log_file.map(|log_path| {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path.file_name().unwrap_or(std::ffi::OsStr::new("ecc-popup.log")),
        );
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new(&directive))
    });

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
}

fn load_settings(args: &Args) -> Result<Settings, String> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_toml_file(path).map_err(|e| e.to_string())?,
        None => Settings::default(),
    };
    if let Some(show) = args.show_type_body {
        settings.popup.show_type_body = show;
    }
    settings.clang.flags.extend(args.flags.iter().cloned());
    Ok(settings)
}

fn run(
    args: &Args,
    settings: &Settings,
) -> Result<String, String> {
    let json = match &args.ast_json {
        Some(path) => std::fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?,
        None => ast::run_ast_dump(&args.file, &settings.clang).map_err(|e| e.to_string())?,
    };
    let main_file = args.file.display().to_string();
    let unit = TranslationUnit::from_json(&json, &main_file).map_err(|e| e.to_string())?;
    info!("lowered {} declarations from {main_file}", unit.declaration_count());

    let cursor = unit
        .cursor_at(args.line, args.col)
        .ok_or_else(|| format!("no symbol at {main_file}:{}:{}", args.line, args.col))?;

    if args.tooltip {
        return tooltip::completion_details(&cursor).ok_or_else(|| format!("no details for {}", cursor.spelling));
    }
    let popup = PopupFormatter::new(settings.popup.clone())
        .info(&cursor)
        .ok_or_else(|| format!("no info for {}", cursor.spelling))?;
    Ok(popup.as_markdown())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("ecc-popup: {e}");
            return ExitCode::FAILURE;
        },
    };
    init_logging(&args, &settings);

    match run(&args, &settings) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}
