use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    gamehub::cli::run_cli().await
}
