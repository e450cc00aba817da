use anyhow::Result;
use pii_config::Config;
use pii_server::RedactServer;

pub async fn handle(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    eprintln!(
        "Starting redaction server on {}:{}",
        config.server.host, config.server.port
    );
    RedactServer::serve(&config).await
}
