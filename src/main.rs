#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries replay responses.
    offsetbp::init_tracing();

    offsetbp::run().await?;

    Ok(())
}
