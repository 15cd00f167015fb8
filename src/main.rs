#[tokio::main]
async fn main() {
    if let Err(e) = konter_admin::run().await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
