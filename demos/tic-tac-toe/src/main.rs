use clap::Parser;
use tictac::prelude::*;
use tracing_subscriber::EnvFilter;

/// Concurrent tic-tac-toe server speaking a line protocol over TCP.
///
/// Connect with any line client (`nc`, `telnet`) and follow the prompts.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Address to listen on
    #[clap(short, long, default_value = "0.0.0.0:5000")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!(addr = %args.addr, "starting tic-tac-toe server");

    let server = TicTacServer::builder().bind(&args.addr).build().await?;
    server.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_addr() {
        let args = Args::try_parse_from(["tic-tac-toe"]).unwrap();
        assert_eq!(args.addr, "0.0.0.0:5000");
    }

    #[test]
    fn test_args_short_and_long_addr() {
        let args =
            Args::try_parse_from(["tic-tac-toe", "-a", "127.0.0.1:9"]).unwrap();
        assert_eq!(args.addr, "127.0.0.1:9");

        let args = Args::try_parse_from(["tic-tac-toe", "--addr", "[::1]:7"])
            .unwrap();
        assert_eq!(args.addr, "[::1]:7");
    }
}
