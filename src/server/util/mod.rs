pub mod parse;
pub mod schedule;
