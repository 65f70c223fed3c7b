use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use mak_cli::render::render_cycle;
use mak_cli::session::{Cycle, Session, run_browser};
use mak_filter::FilterEngine;
use mak_ingest::{
    CachedSource, Credentials, CsvDirectoryProvider, GoogleSheetsProvider, SheetProvider,
    SheetRowSource,
};
use mak_model::{CatalogConfig, Choice, Dimension, Language, OptionPolicy, ReconcilePolicy, Selection};
use mak_output::ExportFormat;
use tracing::{debug, info};

use crate::cli::{
    BrowseArgs, ExportArgs, ExportFormatArg, FilterArgs, LanguageArg, OptionPolicyArg, PolicyArgs,
    ReconcilePolicyArg, SourceArgs,
};

const API_KEY_ENV: &str = "MAK_SHEETS_API_KEY";
const ACCESS_TOKEN_ENV: &str = "MAK_SHEETS_ACCESS_TOKEN";

type CatalogueSource = CachedSource<SheetRowSource<Box<dyn SheetProvider>>>;

pub fn run_show(args: &FilterArgs, source: &SourceArgs, config: &CatalogConfig) -> Result<i32> {
    let mut session = build_session(source, config, args.language, &args.policy)?
        .with_selection(selection_from(args));
    let cycle = session.cycle();
    println!("{}", render_cycle(&cycle));
    Ok(exit_code(&cycle))
}

pub fn run_export(args: &ExportArgs, source: &SourceArgs, config: &CatalogConfig) -> Result<i32> {
    let format = match args.format {
        ExportFormatArg::Csv => ExportFormat::Csv,
        ExportFormatArg::Pdf => ExportFormat::Pdf,
    };
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("catalogue.{}", format.extension())));
    let mut session = build_session(source, config, args.filters.language, &args.filters.policy)?
        .with_selection(selection_from(&args.filters));
    let bytes = session.export(format, &path)?;
    println!("Wrote {} ({bytes} bytes)", path.display());
    Ok(0)
}

pub fn run_browse(args: &BrowseArgs, source: &SourceArgs, config: &CatalogConfig) -> Result<i32> {
    let mut session = build_session(source, config, args.language, &args.policy)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run_browser(&mut session, stdin.lock(), &mut stdout)?;
    stdout.flush()?;
    Ok(0)
}

fn exit_code(cycle: &Cycle) -> i32 {
    match cycle {
        Cycle::Failed(_) => 1,
        Cycle::NoData | Cycle::Ready(_) => 0,
    }
}

fn build_session(
    source: &SourceArgs,
    config: &CatalogConfig,
    language: Option<LanguageArg>,
    policy: &PolicyArgs,
) -> Result<Session<CatalogueSource>> {
    let engine = build_engine(policy, config);
    let language = language.map_or(Language::English, |arg| match arg {
        LanguageArg::English => Language::English,
        LanguageArg::Spanish => Language::Spanish,
    });
    debug!(
        language = %language,
        options = ?engine.option_policy(),
        reconcile = ?engine.reconcile_policy(),
        "session configured"
    );
    Ok(Session::new(
        build_source(source, config)?,
        engine,
        language,
        config.title.clone(),
    ))
}

fn build_engine(policy: &PolicyArgs, config: &CatalogConfig) -> FilterEngine {
    let options = match policy.options {
        Some(OptionPolicyArg::Cascading) => OptionPolicy::Cascading,
        Some(OptionPolicyArg::Intersective) => OptionPolicy::Intersective,
        None => config.options,
    };
    let reconcile = match policy.reconcile {
        Some(ReconcilePolicyArg::AutoReset) => ReconcilePolicy::AutoReset,
        Some(ReconcilePolicyArg::Persistent) => ReconcilePolicy::Persistent,
        None => config.reconcile,
    };
    FilterEngine::new(options, reconcile)
}

fn build_source(source: &SourceArgs, config: &CatalogConfig) -> Result<CatalogueSource> {
    let provider: Box<dyn SheetProvider> = match &source.source_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "reading catalogue from local sheets");
            Box::new(CsvDirectoryProvider::new(dir))
        }
        None => {
            let credentials = credentials(source);
            info!(
                spreadsheet = %config.spreadsheet_key,
                authenticated = credentials.is_some(),
                "reading catalogue from remote workbook"
            );
            Box::new(
                GoogleSheetsProvider::new(
                    config.spreadsheet_key.clone(),
                    credentials,
                    config.request_timeout(),
                )
                .context("build sheets client")?,
            )
        }
    };
    Ok(CachedSource::new(
        SheetRowSource::new(provider, config),
        config.cache_ttl(),
    ))
}

fn credentials(source: &SourceArgs) -> Option<Credentials> {
    let from_env = |name: &str| env::var(name).ok().filter(|value| !value.trim().is_empty());
    if let Some(token) = source.access_token.clone().or_else(|| from_env(ACCESS_TOKEN_ENV)) {
        return Some(Credentials::BearerToken(token));
    }
    source
        .api_key
        .clone()
        .or_else(|| from_env(API_KEY_ENV))
        .map(Credentials::ApiKey)
}

fn selection_from(args: &FilterArgs) -> Selection {
    let mut selection = Selection::all();
    let flags = [
        (Dimension::Category, &args.category),
        (Dimension::Garment, &args.garment),
        (Dimension::Position, &args.position),
        (Dimension::Operation, &args.operation),
    ];
    for (dimension, value) in flags {
        if let Some(value) = value {
            selection.set(dimension, Choice::parse(value));
        }
    }
    selection
}
