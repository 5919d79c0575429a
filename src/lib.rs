// Library root of the `tickboard` crate: a personal climbing-log backend
// that parses tick CSV exports and serves derived views (stats table, grade
// distribution, crag list, journal, region map) over HTTP.
pub mod algorithm;
pub mod api_json;
pub mod ingest;
pub mod models;
pub mod server;

pub use server::run_server;
