//! sftp-packet Inspector
//!
//! Decodes the header of a single raw message stored in a file.

use std::path::PathBuf;

use bytes::Bytes;
use clap::Parser;
use sftp_packet::{CodecConfig, OpCode, Packet, PacketError, StringDecoding};
use tracing_subscriber::{fmt, EnvFilter};

/// sftp-packet Inspector
#[derive(Parser, Debug)]
#[command(name = "sftp-packet-inspect")]
#[command(about = "Decode the header of a raw SFTP-style message")]
#[command(version)]
struct Args {
    /// File holding one raw message
    path: PathBuf,

    /// Fail on string fields that are not valid UTF-8
    #[arg(long)]
    strict: bool,

    /// The message does not start with a 4-byte length prefix
    #[arg(long)]
    no_length: bool,

    /// Decode the rest of the body as consecutive string fields
    #[arg(long)]
    strings: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sftp_packet=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let raw = match std::fs::read(&args.path) {
        Ok(raw) => Bytes::from(raw),
        Err(e) => {
            tracing::error!("Failed to read {}: {}", args.path.display(), e);
            std::process::exit(1);
        }
    };

    tracing::debug!("Loaded {} bytes from {}", raw.len(), args.path.display());

    let policy = if args.strict {
        StringDecoding::Strict
    } else {
        StringDecoding::Lossy
    };
    let config = CodecConfig::builder().string_decoding(policy).build();
    let mut packet = Packet::with_config(raw, config);

    if let Err(e) = inspect(&mut packet, &args) {
        tracing::error!("Malformed message at offset {}: {}", packet.offset(), e);
        std::process::exit(1);
    }
}

fn inspect(packet: &mut Packet<Bytes>, args: &Args) -> Result<(), PacketError> {
    if !args.no_length {
        let declared = packet.read_uint32()?;
        println!("length:    {}", declared);
        if declared as usize != packet.remaining() {
            tracing::warn!(
                "Declared length {} does not match {} body bytes",
                declared,
                packet.remaining()
            );
        }
    }

    let op = packet.read_opcode()?;
    println!("operation: {} ({})", op, op.code());

    if op.is_init() {
        println!("version:   {}", packet.read_uint32()?);
    } else {
        packet.id = packet.read_uint32()?;
        println!("id:        {}", packet.id);
    }

    if args.strings {
        let mut index = 0;
        while !packet.is_empty() {
            let value = packet.read_string()?;
            println!("string[{}]: {:?}", index, value);
            index += 1;
        }
    }

    println!("remaining: {}", packet.remaining());
    describe(op);
    Ok(())
}

fn describe(op: OpCode) {
    let kind = if op.is_request() {
        "request"
    } else if op.is_reply() {
        "reply"
    } else {
        "session setup"
    };
    tracing::info!("{} is a {} message", op, kind);
}
