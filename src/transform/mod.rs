pub mod birth_control;
pub mod cpi;
