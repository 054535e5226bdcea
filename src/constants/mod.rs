pub mod countries;
pub mod rules;

pub use countries::country_label;
