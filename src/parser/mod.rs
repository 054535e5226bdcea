pub mod explodes;
pub mod subparser;

pub use subparser::{explode_sub, unwrap_subscription};
