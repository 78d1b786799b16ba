pub mod aggregate;
pub mod chart;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod query;
pub mod records;
