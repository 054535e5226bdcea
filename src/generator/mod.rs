pub mod exports;
pub mod yaml;

pub use exports::{generate_clash_config, proxy_to_clash_output};
