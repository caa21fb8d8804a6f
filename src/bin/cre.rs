use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use cre_rs::api::DEFAULT_BASE_URL;
use cre_rs::{Client, Controller, DateLocale, Notice, Toggle};
use cre_rs::{render, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cre",
    version,
    about = "Compare sovereign credit ratings across countries"
)]
struct Cli {
    /// Base URL of the ratings backend.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the countries available for comparison.
    Countries(CountriesArgs),
    /// Compare two countries (and optionally save the comparison).
    Compare(CompareArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// Only list countries whose name contains this text (case-insensitive).
    #[arg(short, long, default_value = "")]
    filter: String,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Country names exactly as listed by `cre countries`.
    #[arg(required = true, num_args = 1..)]
    countries: Vec<String>,
    /// Locale for rating dates (en, de, fr, es, it, pt, nl).
    #[arg(short, long, default_value = "en")]
    locale: String,
    /// Save the comparison to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Wrap narrative text at this many columns.
    #[arg(long, default_value_t = 80)]
    width: usize,
}

fn report(notices: Vec<Notice>) -> bool {
    let mut failed = false;
    for n in notices {
        match n {
            Notice::Warning(m) => eprintln!("warning: {m}"),
            Notice::Error(m) => {
                eprintln!("error: {m}");
                failed = true;
            }
        }
    }
    failed
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let client = Client::new(&cli.base_url)?;
    match cli.cmd {
        Command::Countries(args) => cmd_countries(&client, args),
        Command::Compare(args) => cmd_compare(&client, args),
    }
}

fn cmd_countries(client: &Client, args: CountriesArgs) -> Result<()> {
    let mut ctl = Controller::default();
    ctl.load_catalog(client);
    if report(ctl.take_notices()) {
        anyhow::bail!("could not load the country catalog");
    }
    ctl.set_filter(args.filter);
    print!("{}", render::catalog_text(&ctl.catalog_view()));
    Ok(())
}

fn cmd_compare(client: &Client, args: CompareArgs) -> Result<()> {
    let mut ctl = Controller::new(DateLocale::from_tag(&args.locale));
    let mut rejected = false;
    for name in &args.countries {
        rejected |= ctl.toggle(name) == Toggle::Rejected;
    }
    if rejected {
        report(ctl.take_notices());
        anyhow::bail!("at most 2 countries can be compared");
    }
    let view = ctl.compare(client);
    report(ctl.take_notices());
    let Some(view) = view else {
        anyhow::bail!("select 2 distinct countries to compare");
    };

    print!("{}", render::comparison_text(&view, args.width));

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("json"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&view, path)?,
            "json" => storage::save_json(&view, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved comparison to {}", path.display());
    }
    Ok(())
}
