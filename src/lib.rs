pub mod actions;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod ingest;
pub mod listing;
pub mod router;
pub mod schemas;
pub mod session;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;
