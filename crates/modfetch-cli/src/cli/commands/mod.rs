//! CLI command handlers, one file per subcommand.

mod fetch;
mod hex_grid;

pub use fetch::run_fetch;
pub use hex_grid::run_hex_grid;
