use anyhow::Context;
use clap::{Arg, Command};
use modelstack::{FacadeServer, ServerConfig};
use std::net::IpAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("modelstack")
        .version(modelstack::VERSION)
        .about("Local HTTP facade for environmental simulation models")
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("ADDR")
                .help("Address to bind")
                .default_value("127.0.0.1"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to bind")
                .default_value("56789"),
        )
        .get_matches();

    let host: IpAddr = matches
        .get_one::<String>("host")
        .expect("defaulted")
        .parse()
        .context("invalid --host address")?;
    let port: u16 = matches
        .get_one::<String>("port")
        .expect("defaulted")
        .parse()
        .context("invalid --port value")?;

    let config = ServerConfig {
        host,
        port,
        ..ServerConfig::default()
    };

    let mut server = FacadeServer::new(config);
    server.run().await.context("facade server failed")?;
    Ok(())
}
