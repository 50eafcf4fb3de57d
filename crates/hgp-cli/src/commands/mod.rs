pub mod check;
pub mod partition;
