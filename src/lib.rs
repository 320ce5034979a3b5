//! godecls: list the top-level declarations of Go source files, one line each.
//!
//! The library holds the whole pipeline; the `godecls` binary only parses flags,
//! installs logging and maps the run status to an exit code.

pub mod decls;
pub mod error;
pub mod report;
pub mod run;
pub mod sources;

pub use error::{Error, Status};
pub use report::{HeaderMode, Mode, Reporter, RunConfig};
pub use run::run;
pub use sources::SourceUnit;
