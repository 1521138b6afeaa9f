pub mod clipboard;
pub mod date;
pub mod logger;
