#[tokio::main]
async fn main() {
    if let Err(e) = sweetshop::start_server().await {
        eprintln!("server error: {e}");
        std::process::exit(1);
    }
}
