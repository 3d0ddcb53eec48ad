use anyhow::{Context, Result};
use shared_datetime::config::Config;
use shared_datetime::logger::Logger;
use shared_datetime::{datetime, datetime_utc, DateTime};

const USAGE: &str = "Usage: shared-datetime [--utc] [--long] [--init-config] [INPUT] [TEMPLATE]";

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    utc: bool,
    long: bool,
    init_config: bool,
    input: Option<String>,
    template: Option<String>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--utc" => args.utc = true,
            "--long" => args.long = true,
            "--init-config" => args.init_config = true,
            "-h" | "--help" => return Ok(None),
            flag if flag.starts_with("--") => anyhow::bail!("Unknown option: {}\n{}", flag, USAGE),
            _ if args.input.is_none() => args.input = Some(arg),
            _ if args.template.is_none() => args.template = Some(arg),
            _ => anyhow::bail!("Too many arguments\n{}", USAGE),
        }
    }
    Ok(Some(args))
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        println!("{}", USAGE);
        return Ok(());
    };

    if args.init_config {
        return Config::generate_default_config(Config::get_default_config_path()?);
    }

    let config = Config::load()?;
    Logger::from_config(&config.logging)?.install()?;
    config.apply()?;

    let value: DateTime = match (&args.input, args.utc) {
        (Some(input), false) => datetime(input),
        (Some(input), true) => datetime_utc(input),
        (None, false) => DateTime::now(),
        (None, true) => DateTime::now_utc(),
    };

    let template = match &args.template {
        Some(template) => template.as_str(),
        None if args.long => config.display.long_format.as_str(),
        None => config.display.date_format.as_str(),
    };

    if !value.is_valid() {
        eprintln!("❌ Error: could not parse '{}'", args.input.unwrap_or_default());
        std::process::exit(1);
    }
    let rendered = value.format(template);
    println!("{}", rendered);

    let iso = value.to_iso_string().context("Failed to render ISO string")?;
    log::debug!("Rendered {} as '{}'", iso, rendered);
    Ok(())
}
