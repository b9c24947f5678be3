use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use zags::{
    certificate::CertificateData,
    config::AppConfig,
    models::DocumentType,
    numbering::NumberGenerator,
    print::{PrintSink, SpoolDirSink, StdoutSink},
    registry::{parse_status_filter, parse_type_filter, DocumentQuery},
    render::{CertificateRenderer, RenderSettings},
    state::AppState,
};

const USAGE: &str = "Usage:
  zags list [TEXT] [--type TYPE|all] [--status STATUS|all]
  zags stats
  zags preview TYPE [DATA.json] [--number NUMBER]
  zags print TYPE DATA.json";

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(
        component = "zags",
        default_country = %config.default_country,
        print_format = config.print_format.extension(),
        spool_dir = ?config.spool_dir,
        unique_numbers = config.unique_numbers,
        "loaded configuration"
    );

    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "list" => list(config, &rest)?,
        "stats" => stats(config)?,
        "preview" => preview(config, &rest)?,
        "print" => print(config, &rest)?,
        other => {
            eprintln!("Unknown command: {other}\n{USAGE}");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn list(config: AppConfig, args: &[String]) -> Result<()> {
    let mut query = DocumentQuery::all();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--type" => {
                let value = iter.next().context("--type needs a value")?;
                query.doc_type = parse_type_filter(value)?;
            }
            "--status" => {
                let value = iter.next().context("--status needs a value")?;
                query.status = parse_status_filter(value)?;
            }
            text => query.text = text.to_string(),
        }
    }

    let state = build_state(config)?;
    for doc in state.list(&query) {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            doc.number,
            doc.doc_type.label(),
            doc.display_date(),
            doc.full_name,
            doc.status.label()
        );
    }
    Ok(())
}

fn stats(config: AppConfig) -> Result<()> {
    let state = build_state(config)?;
    let stats = state.stats();
    println!("Всего документов: {}", stats.total);
    for status in zags::models::DocumentStatus::ALL {
        println!("{}: {}", status.label(), stats.with_status(status));
    }
    for doc_type in DocumentType::ALL {
        println!("{}: {}", doc_type.label(), stats.with_type(doc_type));
    }
    Ok(())
}

fn preview(config: AppConfig, args: &[String]) -> Result<()> {
    let mut iter = args.iter();
    let doc_type: DocumentType = iter
        .next()
        .context("preview needs a document type")?
        .parse()?;

    let mut data = CertificateData::empty(doc_type);
    let mut number = None;
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--number" => number = Some(iter.next().context("--number needs a value")?.clone()),
            path => data = read_data(doc_type, Path::new(path))?,
        }
    }
    let number = number.unwrap_or_else(|| NumberGenerator::new().generate(doc_type));

    let renderer = CertificateRenderer::new(RenderSettings {
        default_country: config.default_country.clone(),
    });
    let document = renderer.render(&data, &number);
    print!("{}", config.print_format.encode(&document));
    Ok(())
}

fn print(config: AppConfig, args: &[String]) -> Result<()> {
    let [doc_type, path] = args else {
        bail!("print needs a document type and a data file\n{USAGE}");
    };
    let doc_type: DocumentType = doc_type.parse()?;
    let data = read_data(doc_type, Path::new(path))?;

    let mut state = build_state(config)?;
    state.load_form(data)?;
    let saved = state.save_form(doc_type);
    for notice in state.take_notifications() {
        match notice.description {
            Some(description) => eprintln!("{}: {description}", notice.title),
            None => eprintln!("{}", notice.title),
        }
    }
    let record = saved?;

    state.print_document(record.id);
    let delivered = state.spooler_mut().flush();
    if delivered == 0 {
        bail!("certificate {} was not printed", record.number);
    }
    eprintln!("{} отправлен на печать", record.number);
    Ok(())
}

fn read_data(doc_type: DocumentType, path: &Path) -> Result<CertificateData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let data = CertificateData::from_json(doc_type, &raw)
        .with_context(|| format!("invalid {} data in {}", doc_type, path.display()))?;
    Ok(data)
}

fn build_state(config: AppConfig) -> Result<AppState> {
    let sink: Arc<dyn PrintSink> = match &config.spool_dir {
        Some(dir) => Arc::new(SpoolDirSink::new(dir)?),
        None => Arc::new(StdoutSink),
    };
    Ok(AppState::new(config, sink))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
