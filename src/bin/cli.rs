use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    lokalise_sync::cli::run().await?;
    Ok(())
}
