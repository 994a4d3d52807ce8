#[tokio::main]
async fn main() {
    if let Err(e) = menu_journal_be::start_server().await {
        tracing::error!("Server failed to start: {}", e);
        std::process::exit(1);
    }
}
