#[tokio::main]
async fn main() -> anyhow::Result<()> {
    schema_provisioner::cli::run_cli().await
}
