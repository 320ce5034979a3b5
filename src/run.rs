//! Driving a run over all requested source units.
//!
//! Units are processed one at a time, each completely before the next. A failing unit
//! is reported and skipped; its status is merged into the run's outcome.

use std::io::{Read, Write};
use std::path::PathBuf;

use crate::decls;
use crate::error::{Error, Status};
use crate::report::{Mode, Reporter, RunConfig};
use crate::sources::{self, PathKind, SourceUnit};

/// Process every path argument (standard input when there are none).
pub fn run<O, F, E>(
    config: &RunConfig,
    paths: &[PathBuf],
    stdin: &mut dyn Read,
    reporter: &mut Reporter<O, F, E>,
) -> Status
where
    O: Write,
    F: Write,
    E: Write,
{
    let mut status = Status::Success;

    if paths.is_empty() {
        let headers = config.show_headers(0, false);
        status = status.merge(process_unit(config, &SourceUnit::Stdin, headers, stdin, reporter));
    }

    for path in paths {
        match sources::classify(path) {
            Ok(PathKind::File) => {
                let headers = config.show_headers(paths.len(), false);
                let unit = SourceUnit::File(path.clone());
                status = status.merge(process_unit(config, &unit, headers, stdin, reporter));
            }
            Ok(PathKind::Directory) => {
                let headers = config.show_headers(paths.len(), true);
                for unit in sources::directory_units(path) {
                    let unit_status = match unit {
                        Ok(unit) => process_unit(config, &unit, headers, stdin, reporter),
                        Err(err) => fail(reporter, err),
                    };
                    status = status.merge(unit_status);
                }
            }
            Err(err) => status = status.merge(fail(reporter, err)),
        }
    }

    if let Err(err) = reporter.flush() {
        status = status.merge(fail(reporter, err));
    }
    status
}

fn process_unit<O, F, E>(
    config: &RunConfig,
    unit: &SourceUnit,
    headers: bool,
    stdin: &mut dyn Read,
    reporter: &mut Reporter<O, F, E>,
) -> Status
where
    O: Write,
    F: Write,
    E: Write,
{
    match summarize_unit(config, unit, headers, stdin, reporter) {
        Ok(()) => Status::Success,
        Err(err) => fail(reporter, err),
    }
}

fn summarize_unit<O, F, E>(
    config: &RunConfig,
    unit: &SourceUnit,
    headers: bool,
    stdin: &mut dyn Read,
    reporter: &mut Reporter<O, F, E>,
) -> Result<(), Error>
where
    O: Write,
    F: Write,
    E: Write,
{
    let bytes = unit.read(stdin)?;
    let identifier = unit.identifier();
    tracing::debug!(unit = %identifier, bytes = bytes.len(), "processing source unit");

    match config.mode {
        Mode::ListOnly => reporter.finding(&identifier),
        Mode::Declarations => {
            let lines = decls::summarize(&identifier, &bytes)?;
            let header = headers.then_some(identifier.as_str());
            reporter.summaries(header, &lines)
        }
    }
}

fn fail<O, F, E>(reporter: &mut Reporter<O, F, E>, err: Error) -> Status
where
    O: Write,
    F: Write,
    E: Write,
{
    tracing::debug!(error = %err, "source unit failed");
    reporter.error(&err);
    Status::Failure
}
