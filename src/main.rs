// --- Climbing-log visualizer backend - main entry point ---

use tickboard::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let bind = "127.0.0.1:3000";
    println!("=== tickboard (climbing-log API) ===");
    println!("Serving at http://{}", bind);
    run_server(bind, "data/ticks.csv", "./static").await
}
