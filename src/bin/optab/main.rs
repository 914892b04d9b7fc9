use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use optab::table::{ReportWrite, TableDocument, TableFileContainer, UNPREFIXED};

#[derive(Parser)]
#[command(name = "optab")]
#[command(about = "Opcode table inspection and grouping reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every record of a table, warning about records without a group
    Report {
        /// Input opcode table document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Table to report on
        #[arg(short, long, value_name = "NAME", default_value = UNPREFIXED)]
        table: String,

        /// Reject non-string group values and malformed opcode keys
        #[arg(long)]
        strict: bool,
    },

    /// Summarize a table's opcodes by group
    Groups {
        /// Input opcode table document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Table to summarize
        #[arg(short, long, value_name = "NAME", default_value = UNPREFIXED)]
        table: String,

        /// Reject non-string group values and malformed opcode keys
        #[arg(long)]
        strict: bool,
    },

    /// List the tables present in a document
    Tables {
        /// Input opcode table document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Report {
            input,
            table,
            strict,
        } => report(input, table, *strict),
        Commands::Groups {
            input,
            table,
            strict,
        } => groups(input, table, *strict),
        Commands::Tables { input } => tables(input),
    }
}

fn open_document(input: &Path, strict: bool) -> Result<TableDocument> {
    let container = TableFileContainer::new(input)?
        .verify(strict)
        .verify_keys(strict);
    Ok(container.open()?)
}

fn report(input: &Path, table: &str, strict: bool) -> Result<()> {
    let doc = open_document(input, strict)?;
    let table = doc.get_table(table)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_report(table)?;
    Ok(())
}

fn groups(input: &Path, table: &str, strict: bool) -> Result<()> {
    let doc = open_document(input, strict)?;
    let index = doc.get_table(table)?.group_index();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", index.summary_table())?;
    Ok(())
}

fn tables(input: &Path) -> Result<()> {
    let doc = open_document(input, false)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for table in doc.tables() {
        writeln!(out, "{}: {} records", table.name(), table.len())?;
    }
    for (name, found) in doc.ignored() {
        writeln!(out, "{}: ignored ({})", name, found)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults_to_the_unprefixed_table() {
        let cli = Cli::parse_from(["optab", "report", "opcodes.json"]);
        let Commands::Report { input, table, strict } = cli.command else {
            panic!("expected the report subcommand");
        };
        assert_eq!(input, PathBuf::from("opcodes.json"));
        assert_eq!(table, UNPREFIXED);
        assert!(!strict);
    }

    #[test]
    fn groups_accepts_table_and_strict() {
        let cli = Cli::parse_from(["optab", "groups", "opcodes.json", "-t", "cbprefixed", "--strict"]);
        let Commands::Groups { table, strict, .. } = cli.command else {
            panic!("expected the groups subcommand");
        };
        assert_eq!(table, "cbprefixed");
        assert!(strict);
    }
}
