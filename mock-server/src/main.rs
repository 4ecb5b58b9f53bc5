//! Standalone mock WordPress for trying the client by hand.
//!
//! `MOCK_WP_BIND` sets the listen address (default `127.0.0.1`), `PORT`
//! the port (default `8080`).

use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let bind = std::env::var("MOCK_WP_BIND").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = match std::env::var("PORT") {
        Ok(raw) => raw.parse().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("PORT={raw}: {e}"))
        })?,
        Err(_) => 8080,
    };

    let listener = TcpListener::bind((bind.as_str(), port)).await?;
    let addr = listener.local_addr()?;
    println!("mock WordPress at http://{addr}/");
    println!("  REST root:            http://{addr}/wp-json/");
    println!(
        "  application password: {} / {}",
        mock_server::USERNAME,
        mock_server::PASSWORD
    );
    mock_server::run(listener).await
}
