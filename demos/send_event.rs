//! Example: report a single event to a Mini Sentry server.

use minisentry::{Event, MiniSentry};

#[tokio::main]
async fn main() -> minisentry::Result<()> {
    // Create client from MS_BASE / MS_TOKEN environment variables
    let client = MiniSentry::from_env()?;

    let event = Event::new("Hello from Rust", "info")
        .release("1.0.0")
        .environment("development")
        .app("rust-example");

    client.send(&event).await?;

    println!("Event sent!");
    println!("  Endpoint: {}", client.config().base_url());

    Ok(())
}
