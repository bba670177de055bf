//! Example: report a release-health session to a Mini Sentry server.

use minisentry::{MiniSentry, Session};

#[tokio::main]
async fn main() -> minisentry::Result<()> {
    // Create client from MS_BASE / MS_TOKEN environment variables
    let client = MiniSentry::from_env()?;

    let session = Session::new("ok")
        .release("1.0.0")
        .environment("production")
        .user("user-xyz")
        .duration_ms(1200);

    client.send_session(&session).await?;

    println!("Session sent!");
    println!("  ID: {}", session.session_id);
    println!("  Status: {}", session.status);

    Ok(())
}
