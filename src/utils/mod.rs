pub mod period;
pub mod validation;
