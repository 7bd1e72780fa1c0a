pub mod cli;
pub mod config;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod report;
