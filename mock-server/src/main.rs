use tokio::net::TcpListener;

/// `COMMAND_PORT` + `QUERY_PORT` serve the two sides on separate listeners;
/// otherwise `PORT` serves both behind one gateway.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let split = std::env::var("COMMAND_PORT").ok().zip(std::env::var("QUERY_PORT").ok());
    if let Some((command_port, query_port)) = split {
        let command_addr = format!("127.0.0.1:{command_port}");
        let query_addr = format!("127.0.0.1:{query_port}");
        let command = TcpListener::bind(&command_addr).await?;
        let query = TcpListener::bind(&query_addr).await?;
        log::info!("command side on {command_addr}{}", mock_server::COMMAND_PREFIX);
        log::info!("query side on {query_addr}{}", mock_server::QUERY_PREFIX);
        return mock_server::run_split(command, query).await;
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "8084".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    log::info!("gateway listening on {addr}");
    mock_server::run(listener).await
}
