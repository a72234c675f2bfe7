use std::io::Write;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::links::LinkResolver;
use crate::output;
use crate::runner::{CatalogSource, Options, Runner};
use crate::view::{self, SortColumn, SortState};

fn print_banner(no_color: bool) {
    let _ = no_color;
    const BANNER: &str = r#"
    __                __       __
   / /_  ____  ____  / /______/ /__  _  __
  / __ \/ __ \/ __ \/ //_/ __  / _ \| |/_/
 / /_/ / /_/ / /_/ / ,< / /_/ /  __/>  <
/_.___/\____/\____/_/|_|\__,_/\___/_/|_|

       v0.2.1 - book catalog shaping and report tool
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn direction_label(ascending: bool) -> &'static str {
    if ascending {
        "asc"
    } else {
        "desc"
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    url: Option<String>,
    input_file: Option<String>,
    query: String,
    sort: SortState,
    format: Option<String>,
    output: Option<String>,
    download_base: Option<String>,
    cover_dir: Option<String>,
    timeout: usize,
    proxy: Option<String>,
    no_color: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let url = args.url.or(cfg.url).map(|u| u.trim().to_string());
    let input_file = args
        .input_file
        .or(cfg.input_file)
        .map(|p| config::expand_tilde_string(&p));

    let query = args.query.or(cfg.query).unwrap_or_default();

    let sort_raw = args.sort.or(cfg.sort).unwrap_or_else(|| "no".to_string());
    let column = SortColumn::parse(&sort_raw)
        .ok_or_else(|| format!("invalid sort column '{sort_raw}', expected no or title"))?;
    let descending = args.descending || cfg.descending.unwrap_or(false);
    let sort = SortState::new(column, !descending);

    let format = args.format.or(cfg.format);
    if let Some(raw) = format.as_deref() {
        if output::OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid format '{raw}', expected text, json, or html"));
        }
    }
    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));

    let download_base = args.download_base.or(cfg.download_base);
    let cover_dir = args.cover_dir.or(cfg.cover_dir);

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    let proxy = args.proxy.or(cfg.proxy);

    Ok(RunConfig {
        url,
        input_file,
        query,
        sort,
        format,
        output,
        download_base,
        cover_dir,
        timeout,
        proxy,
        no_color,
        verbose: args.verbose,
    })
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner(run.no_color);

    let runner = Runner::new(Options {
        url: run.url.clone(),
        input_file: run.input_file.clone(),
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
    })
    .map_err(|e| e.to_string())?;

    let source_label = match runner.source() {
        CatalogSource::Url(url) => url.clone(),
        CatalogSource::FilePath(path) => path.clone(),
    };
    format_kv_line("Source", &source_label);
    if run.verbose > 0 {
        format_kv_line(
            "HTTP",
            &format!(
                "timeout={}s proxy={}",
                run.timeout,
                format_bool(run.proxy.is_some())
            ),
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("loading books...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = match runner.run().await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            outcome
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.to_string());
        }
    };

    format_kv_line(
        "Catalog",
        &format!(
            "records={} titles={}",
            outcome.records_total,
            outcome.catalog.len()
        ),
    );
    format_kv_line(
        "Display",
        &format!(
            "sort={} dir={} query={}",
            run.sort.column.as_str(),
            direction_label(run.sort.ascending),
            if run.query.trim().is_empty() {
                "none"
            } else {
                run.query.trim()
            }
        ),
    );

    let filtered = outcome.catalog.filter(&run.query);
    let rows = view::build_rows(&filtered, run.sort);
    if !run.query.trim().is_empty() {
        format_kv_line(
            "Matches",
            &format!("{} of {}", filtered.len(), outcome.catalog.len()),
        );
    }

    let links = LinkResolver::new(run.download_base.clone(), run.cover_dir.clone());
    let records = output::build_records(&rows, &links);

    let format = run
        .format
        .as_deref()
        .and_then(output::OutputFormat::parse)
        .or_else(|| {
            run.output
                .as_deref()
                .and_then(output::infer_format_from_path)
        })
        .unwrap_or(output::OutputFormat::Text);

    let rendered = match format {
        output::OutputFormat::Text => output::render_text(&records),
        output::OutputFormat::Json => output::render_json(&records),
        output::OutputFormat::Html => output::render_html(&records),
    };

    match run.output.as_ref() {
        Some(outfile_path) => {
            let mut outfile = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(outfile_path)
                .await
                .map_err(|e| format!("failed to open output file: {e}"))?;
            outfile
                .write_all(&rendered)
                .await
                .map_err(|_| "failed to write output file".to_string())?;
            format_kv_line("Output", outfile_path);
        }
        None => {
            println!();
            std::io::stdout()
                .write_all(&rendered)
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
        }
    }

    println!();
    println!(
        "{} {} books in {}ms {}",
        "::".bold().white(),
        records.len(),
        outcome.elapsed.as_millis(),
        "::".bold().white()
    );

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                let mut cmd = CliArgs::command();
                let _ = cmd.print_help();
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    if args.init_config {
        let path = args
            .config
            .clone()
            .map(|p| config::expand_tilde(&p))
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not determine config path".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!("wrote default config to {}", path.display());
        return Ok(());
    }

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
