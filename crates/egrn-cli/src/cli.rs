//! `egrn` command definitions and execution.

use crate::config::EgrnConfig;
use crate::input::build_input;
use anyhow::Result;
use clap::{Parser, Subcommand};
use egrn_conversion::{ConversionError, ConversionRegistry};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// eGRN quantity conversion tool
#[derive(Parser, Debug)]
#[command(name = "egrn")]
#[command(about = "Normalize goods-received quantities captured in packaging units")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to $EGRN_CONFIG_PATH or ./egrn.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the registered conversion types
    List,

    /// Print the field schema of a conversion type as JSON
    Describe {
        /// Conversion type, e.g. cut9_conversion
        name: String,
    },

    /// Convert captured packaging units into a received quantity
    Convert {
        /// Conversion type, e.g. chicken_conversion
        name: String,

        /// Field value as KEY=VALUE; repeatable
        #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// JSON object of field values; `-` reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// How a command finished, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The submitted fields failed validation.
    InvalidInput,
    UnknownConversion,
    /// The engine broke one of its own output guarantees.
    InternalError,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::InvalidInput => 2,
            Outcome::UnknownConversion => 3,
            Outcome::InternalError => 70,
        }
    }
}

impl Cli {
    /// Execute the CLI command, writing results to `out` and failures to `err`.
    pub fn execute(
        &self,
        config: &EgrnConfig,
        registry: &ConversionRegistry,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<Outcome> {
        let pretty = self.pretty || config.output.pretty;

        match &self.command {
            Command::List => {
                for name in registry.names() {
                    writeln!(out, "{name}")?;
                }
                Ok(Outcome::Success)
            }
            Command::Describe { name } => match registry.get_spec(name) {
                Ok(spec) => {
                    write_json(out, spec, pretty)?;
                    Ok(Outcome::Success)
                }
                Err(e) => report_failure(err, &e, pretty),
            },
            Command::Convert { name, fields, input } => {
                let input = build_input(input.as_deref(), fields)?;
                debug!(conversion = %name, fields = input.len(), "Running conversion");

                match registry.convert(name, &input) {
                    Ok(result) => {
                        info!(
                            conversion = %name,
                            quantity_received = result.quantity_received,
                            "Conversion complete"
                        );
                        write_json(out, &result, pretty)?;
                        Ok(Outcome::Success)
                    }
                    Err(e) => report_failure(err, &e, pretty),
                }
            }
        }
    }
}

fn report_failure(err: &mut impl Write, error: &ConversionError, pretty: bool) -> Result<Outcome> {
    match error {
        ConversionError::Validation(report) => {
            info!(errors = report.len(), "Conversion input rejected");
            write_json(err, report.errors(), pretty)?;
            Ok(Outcome::InvalidInput)
        }
        ConversionError::UnknownConversion { .. } => {
            writeln!(err, "{error}")?;
            Ok(Outcome::UnknownConversion)
        }
        other => {
            error!(
                category = other.category(),
                severity = %other.severity(),
                error = %other,
                "Conversion engine failure"
            );
            writeln!(err, "{other}")?;
            Ok(Outcome::InternalError)
        }
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
