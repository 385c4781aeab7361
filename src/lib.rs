//! Confstack - merge same-named config files into one configuration object
//!
//! Applications often want to accept configuration in whichever format the
//! user prefers. Confstack scans a directory for files that share a
//! requested base name but differ in extension (`app.json`, `app.yaml`,
//! ...), parses each with the parser registered for its extension, and
//! deep-merges the parsed documents into a single [`serde_json::Value`].
//!
//! ```no_run
//! use confstack::{parsers, ConfigLoader};
//!
//! # fn main() -> confstack::Result<()> {
//! let loader = ConfigLoader::with_base_dir("conf");
//! loader.parsers().register("yaml", parsers::yaml);
//!
//! let settings = loader.load_sync("app")?;
//! # Ok(())
//! # }
//! ```
//!
//! Merge precedence between multiple matching files follows
//! directory-listing order, which is filesystem-dependent. See
//! [`loader`] for details.

pub mod encoding;
pub mod loader;
pub mod merge;
pub mod parsers;
pub mod registry;
pub mod types;

pub use loader::ConfigLoader;
pub use merge::deep_merge;
pub use registry::{ParseFailure, ParseFn, ParserRegistry};
pub use types::{ConfigError, LoadRequest, Result};
