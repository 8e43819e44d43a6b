//! Command dispatch: wires the CLI onto the load pipeline.

use std::io;
use std::path::Path;
use std::process;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::domain::{validate, QuestionForest, QuestionParser, TreeBuilder, ValidationReport};
use crate::exitcode;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let parser = QuestionParser::with_delimiter(cli.delimiter);
    match &cli.command {
        Some(Commands::Validate { file }) => _validate(&parser, file),
        Some(Commands::Tree { file, force }) => _tree(&parser, file, *force),
        Some(Commands::Json { file, pretty }) => _json(&parser, file, *pretty),
        Some(Commands::Info { file }) => _info(&parser, file),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "questree", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Print the complete problem list and exit with a data error.
/// The full list is always shown, never just the first problem.
fn report_and_exit(file: &Path, report: &ValidationReport) -> ! {
    output::error(&format!(
        "{} problem(s) found in {}",
        report.errors.len(),
        file.display()
    ));
    for problem in &report.errors {
        output::problem(problem);
    }
    process::exit(exitcode::DATAERR);
}

fn warn_orphans(forest: &QuestionForest) {
    for id in forest.orphans() {
        output::warning(&format!("question {id} has an unknown parent, kept as root"));
    }
}

#[instrument(skip(parser))]
fn _validate(parser: &QuestionParser, file: &Path) -> CliResult<()> {
    let records = parser.parse_path(file)?;
    let report = validate(&records);
    if !report.valid {
        report_and_exit(file, &report);
    }
    output::success(&format!("{} questions, no problems found", records.len()));
    Ok(())
}

#[instrument(skip(parser))]
fn _tree(parser: &QuestionParser, file: &Path, force: bool) -> CliResult<()> {
    let records = parser.parse_path(file)?;
    if !force {
        let report = validate(&records);
        if !report.valid {
            report_and_exit(file, &report);
        }
    }

    let forest = TreeBuilder::new().build(&records);
    warn_orphans(&forest);
    output::info(&format!(
        "{} questions in {} trees:\n",
        forest.len(),
        forest.roots().len()
    ));
    print!("{}", forest);
    Ok(())
}

#[instrument(skip(parser))]
fn _json(parser: &QuestionParser, file: &Path, pretty: bool) -> CliResult<()> {
    let records = parser.parse_path(file)?;
    let report = validate(&records);
    if !report.valid {
        // Structured failure payload: the full error list, machine-readable.
        println!("{}", serde_json::to_string(&report)?);
        process::exit(exitcode::DATAERR);
    }

    let forest = TreeBuilder::new().build(&records);
    let nodes = forest.to_nodes();
    let payload = if pretty {
        serde_json::to_string_pretty(&nodes)?
    } else {
        serde_json::to_string(&nodes)?
    };
    println!("{payload}");
    Ok(())
}

#[instrument(skip(parser))]
fn _info(parser: &QuestionParser, file: &Path) -> CliResult<()> {
    let records = parser.parse_path(file)?;
    let report = validate(&records);
    let forest = TreeBuilder::new().build(&records);
    debug!(records = records.len(), roots = forest.roots().len(), "info");

    output::header(&file.display().to_string());
    output::detail(&format!("questions: {}", records.len()));
    output::detail(&format!("roots:     {}", forest.roots().len()));
    output::detail(&format!("depth:     {}", forest.depth()));
    output::detail(&format!("orphans:   {}", forest.orphans().len()));

    let kinds = records
        .iter()
        .map(|r| match r.content_kind() {
            Some(kind) if kind.as_tag().is_empty() => "(section)",
            Some(kind) => kind.as_tag(),
            None => "(invalid)",
        })
        .counts();
    for (tag, count) in kinds.iter().sorted() {
        output::detail(&format!("kind {tag}: {count}"));
    }

    if report.valid {
        output::success("sheet is valid");
    } else {
        output::warning(&format!("{} validation problem(s)", report.errors.len()));
    }
    Ok(())
}
