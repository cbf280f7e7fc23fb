/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;


pub use loader::{LoadedConfig, bind_addr, find_site_config, load_site_config};
