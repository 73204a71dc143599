use std::io::Write;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::calculators::CalculatorKind;
use crate::error::CalcError;
use crate::export::write_csv;
use crate::form::Form;
use crate::format::render_text;
use crate::report::Calculation;

#[derive(Parser, Debug)]
#[command(
    name = "ukcalc",
    about = "UK personal finance calculators (mortgages, tax, pensions, savings)"
)]
pub struct Cli {
    /// Debug logging for this crate; `RUST_LOG` overrides it.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the calculators over HTTP.
    Serve(ServeArgs),
    /// List calculators and their fields.
    List,
    /// Run one calculator.
    Calc(CalcArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    #[arg(long, env = "UKCALC_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, env = "UKCALC_PORT", default_value_t = 8080)]
    pub port: u16,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug, Clone)]
pub struct CalcArgs {
    #[arg(value_enum)]
    pub calculator: CalculatorKind,
    /// Inputs as `field=value`, e.g. `principal=250000`.
    pub fields: Vec<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

fn parse_field(raw: &str) -> Result<(String, String), CalcError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CalcError::InvalidField(raw.to_string())),
    }
}

pub fn form_from_args(fields: &[String]) -> Result<Form, CalcError> {
    let pairs = fields
        .iter()
        .map(|raw| parse_field(raw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Form::from_pairs(pairs))
}

pub fn run_calc<W: Write>(args: &CalcArgs, mut out: W) -> Result<(), CalcError> {
    let kind = args.calculator;
    let form = form_from_args(&args.fields)?;
    for name in form.field_names() {
        if !kind.fields().iter().any(|field| field.name == name) {
            warn!(calculator = kind.id(), field = name, "ignoring unknown field");
        }
    }

    let report = kind.evaluate(&form);
    match args.format {
        OutputFormat::Text => match &report {
            Some(report) => write!(out, "{}", render_text(kind.title(), report))?,
            None => writeln!(out, "{}\n  Not computable with these inputs.", kind.title())?,
        },
        OutputFormat::Json => {
            let calculation = Calculation::new(kind.id(), kind.title(), report.as_ref());
            serde_json::to_writer_pretty(&mut out, &calculation)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            if let Some(report) = &report {
                write_csv(report, &mut out)?;
            }
        }
    }
    Ok(())
}

pub fn run_list<W: Write>(mut out: W) -> Result<(), CalcError> {
    for kind in CalculatorKind::ALL {
        let fields: Vec<&str> = kind.fields().iter().map(|field| field.name).collect();
        writeln!(
            out,
            "{:<24} {:<26} {}",
            kind.id(),
            kind.title(),
            fields.join(", ")
        )?;
    }
    Ok(())
}

pub async fn run(cli: Cli) -> Result<(), CalcError> {
    match cli.command {
        Command::Serve(args) => crate::api::run_http_server(&args.host, args.port).await?,
        Command::List => run_list(std::io::stdout().lock())?,
        Command::Calc(args) => run_calc(&args, std::io::stdout().lock())?,
    }
    Ok(())
}
