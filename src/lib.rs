pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod links;
pub mod output;
pub mod runner;
pub mod view;

#[cfg(test)]
mod tests;
