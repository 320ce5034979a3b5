//! Run configuration and output assembly.

use std::io::Write;

use crate::error::Error;

/// What a run produces for each source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Summary lines on the primary stream.
    #[default]
    Declarations,
    /// Only the unit identifier, on the findings stream.
    ListOnly,
}

/// When summary lines are prefixed with `<source>:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Headers when several paths were given or the unit came from a directory.
    #[default]
    Auto,
    Always,
    Never,
}

/// Immutable settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub mode: Mode,
    pub headers: HeaderMode,
}

impl RunConfig {
    /// Resolve header display for a unit.
    ///
    /// `path_count` is the number of path arguments; `from_directory` tells whether the
    /// unit was found by expanding a directory argument.
    pub fn show_headers(&self, path_count: usize, from_directory: bool) -> bool {
        match self.headers {
            HeaderMode::Always => true,
            HeaderMode::Never => false,
            HeaderMode::Auto => path_count > 1 || from_directory,
        }
    }
}

/// Writes summaries, findings and errors to their streams.
pub struct Reporter<O, F, E> {
    out: O,
    findings: F,
    errors: E,
}

impl<O: Write, F: Write, E: Write> Reporter<O, F, E> {
    pub fn new(out: O, findings: F, errors: E) -> Self {
        Self {
            out,
            findings,
            errors,
        }
    }

    /// Write the summary lines of one unit, each prefixed with `header:` when given.
    pub fn summaries(&mut self, header: Option<&str>, lines: &[String]) -> Result<(), Error> {
        let mut buffer = String::new();
        for line in lines {
            if let Some(header) = header {
                buffer.push_str(header);
                buffer.push(':');
            }
            buffer.push_str(line);
        }
        self.out.write_all(buffer.as_bytes())?;
        Ok(())
    }

    /// Record a unit that would have been processed.
    pub fn finding(&mut self, identifier: &str) -> Result<(), Error> {
        writeln!(self.findings, "{}", identifier)?;
        Ok(())
    }

    /// Report an error on the error stream. A failing error stream leaves nothing
    /// else to report to, so its own failure is dropped.
    pub fn error(&mut self, err: &Error) {
        let _ = writeln!(self.errors, "{}", err);
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.out.flush()?;
        self.findings.flush()?;
        Ok(())
    }

    /// Give the streams back, mostly for inspecting in-memory output.
    pub fn into_inner(self) -> (O, F, E) {
        (self.out, self.findings, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_headers() {
        let auto = RunConfig::default();
        assert!(!auto.show_headers(0, false));
        assert!(!auto.show_headers(1, false));
        assert!(auto.show_headers(1, true));
        assert!(auto.show_headers(2, false));

        let never = RunConfig {
            headers: HeaderMode::Never,
            ..RunConfig::default()
        };
        assert!(!never.show_headers(3, true));

        let always = RunConfig {
            headers: HeaderMode::Always,
            ..RunConfig::default()
        };
        assert!(always.show_headers(1, false));
    }

    #[test]
    fn test_summaries_with_header() {
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), Vec::new());
        let lines = vec!["var a = 1\n".to_string(), "func f() {...}\n".to_string()];
        reporter.summaries(Some("a.go"), &lines).unwrap();
        reporter.finding("b.go").unwrap();
        let (out, findings, errors) = reporter.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "a.go:var a = 1\na.go:func f() {...}\n");
        assert_eq!(String::from_utf8(findings).unwrap(), "b.go\n");
        assert!(errors.is_empty());
    }
}
