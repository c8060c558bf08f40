//! Command-line front end for the glaze class-string normaliser.
//!
//! The `glaze` binary walks a component tree, runs every class attribute it
//! finds through [`glaze_tokens::Pipeline`], and either reports what would
//! change (the default) or writes the rewrites back.
//!
//! # Configuration
//!
//! Settings come from environment variables and are overridden by
//! command-line flags:
//!
//! - `GLAZE_LOG_LEVEL`: log verbosity (trace, debug, info, warn, error)
//! - `GLAZE_WRITE`: persist rewrites
//! - `GLAZE_INSERT_BORDER_KEYWORD`: add a missing `border` keyword
//! - `GLAZE_DEFAULT_BORDER_OPACITY`: give a plain `border` a default colour
//!
//! # Example
//!
//! ```no_run
//! use glaze::config::GlazeConfig;
//! use glaze::run::run;
//!
//! let config = GlazeConfig::from_env()?;
//! let summary = run(&config, &[".".into()])?;
//! assert_eq!(summary.skipped, 0);
//! # Ok::<(), glaze::error::GlazeError>(())
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod report;
pub mod run;
