pub mod blips;
pub mod help;
pub mod radar;
