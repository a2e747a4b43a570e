// SPDX-License-Identifier: AGPL-3.0-or-later
//! mdocx - convert a Markdown file into a Word document
//!
//! ```text
//! mdocx notes.md              # writes notes.docx next to the source
//! mdocx notes.md out.docx
//! mdocx notes.md --dump-ast   # print the parsed document as JSON
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mdocx_core::{convert, default_output_path, parse_file};

#[derive(Parser)]
#[command(name = "mdocx", version, about)]
struct Cli {
    /// Markdown file to convert
    input: PathBuf,

    /// Destination .docx file (defaults to the input with a .docx extension)
    output: Option<PathBuf>,

    /// Enable info-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the parsed document as JSON instead of writing a file
    #[arg(long)]
    dump_ast: bool,
}

fn dump_ast(cli: &Cli) -> anyhow::Result<()> {
    let doc = parse_file(&cli.input)?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.dump_ast {
        return dump_ast(cli);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    debug!(output = %output.display(), "resolved destination");

    let report = convert(&cli.input, &output)?;
    println!(
        "Wrote {} ({} paragraphs, {} tables, {} words, {} characters, {} bytes)",
        output.display(),
        report.paragraphs,
        report.tables,
        report.words,
        report.characters,
        report.bytes_written
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use mdocx_core::ConversionError;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_is_optional() {
        let cli = Cli::try_parse_from(["mdocx", "notes.md"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("notes.md"));
        assert!(cli.output.is_none());
        assert!(!cli.dump_ast);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["mdocx", "a.md", "b.docx", "-v", "--dump-ast"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("b.docx")));
        assert!(cli.verbose);
        assert!(cli.dump_ast);
    }

    #[test]
    fn test_dump_ast_reports_missing_source_like_convert() {
        let cli = Cli::try_parse_from(["mdocx", "/nonexistent/notes.md", "--dump-ast"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConversionError>(),
            Some(ConversionError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["mdocx"]).is_err());
    }
}
