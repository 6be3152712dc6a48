use std::{
    error::Error,
    fs::read,
    io::{BufWriter, Write, stdout},
    path::PathBuf,
    process::ExitCode,
};

use bitdump_xilinx_packet::{DecodeError, PacketParser, WithOffset};
use clap::Parser;
use log::{debug, info};

/// Dumps the configuration packets of a 7-series style Xilinx bitstream.
#[derive(Parser)]
struct Args {
    /// Bitstream file (.bit or .bin).
    file: PathBuf,
    /// Only check that the stream decodes, print nothing.
    #[arg(short, long)]
    quiet: bool,
    /// Prefix each line with the byte offset of the packet header.
    #[arg(long)]
    offsets: bool,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let data = read(&args.file)?;
    debug!("read {} bytes from {}", data.len(), args.file.display());

    let mut out = BufWriter::new(stdout().lock());
    let mut packets = 0;
    for item in PacketParser::new(&data) {
        match item {
            Ok(rec) => {
                packets += 1;
                if args.quiet {
                    continue;
                }
                if args.offsets {
                    writeln!(out, "{}", WithOffset(&rec))?;
                } else {
                    writeln!(out, "{rec}")?;
                }
            }
            Err(DecodeError::SyncNotFound) => {
                writeln!(out, "Sync word not found")?;
                out.flush()?;
                return Ok(ExitCode::FAILURE);
            }
            Err(err) => {
                out.flush()?;
                eprintln!("{}: {err}", args.file.display());
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    out.flush()?;
    info!("decoded {packets} packets");
    Ok(ExitCode::SUCCESS)
}
