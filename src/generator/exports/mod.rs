pub mod clash;
pub mod proxy_to_clash;

pub use clash::{generate_clash_config, proxy_to_clash_output};
pub use proxy_to_clash::display_name;
