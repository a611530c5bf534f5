pub mod db;
pub mod pagination;
pub mod server;
pub mod settings;
pub mod telemetry;

#[cfg(test)]
mod test_utils;
