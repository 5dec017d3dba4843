pub mod pressure;
pub mod staffing;
