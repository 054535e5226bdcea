pub mod common;
pub mod ss;
pub mod trojan;
pub mod vmess;

pub use common::{explode, is_valid_node};
pub use ss::explode_ss;
pub use trojan::explode_trojan;
pub use vmess::explode_vmess;
