use clap::{Parser, Subcommand, ValueEnum};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use tracing::info;
use wireline::config;
use wireline::engine::HeapPool;
use wireline::packet::{
    extract, BuildRequest, LinkAddressing, MacAddr, PacketBuilder, Transport,
};
use wireline::telemetry::init_logging;
use wireline::{Error, Result};

#[derive(Parser)]
#[command(name = "wireline")]
#[command(about = "Ethernet/IPv4/TCP/UDP header codec")]
struct Cli {
    /// Path to config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a hex-encoded frame and print the extracted view
    Decode {
        /// Frame bytes as a hex string
        frame: String,
    },
    /// Build a frame and print it hex-encoded, checksums computed in software
    Encode {
        #[arg(long)]
        src_ip: Ipv4Addr,
        #[arg(long)]
        dst_ip: Ipv4Addr,
        #[arg(long)]
        src_port: u16,
        #[arg(long)]
        dst_port: u16,
        #[arg(long, value_enum, default_value = "udp")]
        transport: TransportArg,
        /// Payload bytes as a hex string
        #[arg(long)]
        payload: String,
    },
    /// Validate a config.toml
    Validate,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TransportArg {
    Tcp,
    Udp,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Tcp => Transport::Tcp,
            TransportArg::Udp => Transport::Udp,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            std::process::exit(1);
        }
    };
    init_logging(Some(&config.log));

    let result = match cli.command {
        Commands::Decode { frame } => cmd_decode(&frame),
        Commands::Encode {
            src_ip,
            dst_ip,
            src_port,
            dst_port,
            transport,
            payload,
        } => cmd_encode(
            &config,
            src_ip,
            dst_ip,
            src_port,
            dst_port,
            transport.into(),
            &payload,
        ),
        Commands::Validate => {
            println!("config OK");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("[ERROR] {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<config::Config> {
    match path {
        Some(path) => config::load(path),
        None => Ok(config::Config::default()),
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s.trim()).map_err(|e| Error::InvalidRequest(format!("bad hex input: {}", e)))
}

fn cmd_decode(frame_hex: &str) -> Result<()> {
    let frame = decode_hex(frame_hex)?;
    let view = extract(&frame)?;

    info!(len = frame.len(), "frame decoded");
    println!(
        "{}:{} -> {}:{}",
        view.src_addr(),
        view.src_port(),
        view.dst_addr(),
        view.dst_port()
    );
    println!("transport: {:?}", view.transport());
    println!("payload ({} bytes): {}", view.payload().len(), hex::encode(view.payload()));
    Ok(())
}

fn cmd_encode(
    config: &config::Config,
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    src_port: u16,
    dst_port: u16,
    transport: Transport,
    payload_hex: &str,
) -> Result<()> {
    let payload = decode_hex(payload_hex)?;
    let pool = HeapPool::new(config.pool.buffer_size, 1);

    let request = BuildRequest {
        src_ip,
        dst_ip,
        src_port,
        dst_port,
        transport,
        link: LinkAddressing::Explicit {
            src: config.codec.source_mac()?,
            dst: MacAddr::BROADCAST,
        },
        payload: &payload,
    };

    let mut frame = PacketBuilder::new()
        .ttl(config.codec.ttl)
        .tcp_window(config.codec.tcp_window)
        .build(&pool, &request)?;
    // No NIC on this path, so fill the checksums in software.
    frame.finalize_in_software()?;

    info!(len = frame.len(), "frame encoded");
    println!("{}", hex::encode(frame.as_bytes()));
    Ok(())
}
