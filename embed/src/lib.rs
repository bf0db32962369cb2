//! Bake a directory of asset files into a C header of gzipped byte arrays.

mod compress;
pub use compress::{compress, gunzip, gzip};

mod config;
pub use config::Config;

mod discover;
pub use discover::discover_inputs;

mod generate;
pub use generate::{Generator, Outcome, Status};

mod ident;
pub use ident::{assign_idents, Ident};

mod render;
pub use render::{render_constant, render_preamble, Constant};

/// Directive that pulls in the flash placement macros on ESP/AVR targets.
pub const DEFAULT_DIRECTIVE: &str = "#include <pgmspace.h> //for PROGMEM";

/// Storage qualifier that keeps the arrays out of RAM.
pub const DEFAULT_QUALIFIER: &str = "PROGMEM";
