//! Server command implementation

use std::path::Path;

use anyhow::Result;

use loomsight_server::ServerConfig;

pub async fn cmd_serve(host: &str, port: u16, static_dir: Option<&Path>) -> Result<()> {
    println!("🚀 Starting Loomsight web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if std::env::var("KIMI_API_KEY").is_ok() {
        println!("   🔮 Predictive insights: Kimi API configured");
    } else {
        println!("   ℹ️  Predictive insights: not configured (set KIMI_API_KEY)");
    }
    println!();

    // Parse allowed CORS origins from environment (comma-separated)
    let allowed_origins: Vec<String> = std::env::var("LOOMSIGHT_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let config = ServerConfig { allowed_origins };
    let static_dir = static_dir.and_then(|p| p.to_str());

    loomsight_server::serve(host, port, static_dir, config).await
}
