use clap::{Parser, Subcommand, ValueEnum};
use i2c_eeprom::{Chip, EepromBuilder, EepromBus, EepromDevice, HalBus};
use std::{error::Error, process::ExitCode, time::Duration};

/// Read and write a 24Cxx serial EEPROM on a Linux I2C bus
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to I2C bus (e.g., /dev/i2c-1)
    #[arg(short, long)]
    path: String,
    /// 7-bit bus address of the EEPROM
    #[arg(short, long, default_value = "0x50", value_parser = parse_number::<u8>)]
    address: u8,
    /// Chip preset providing capacity and page size
    #[arg(short, long, value_enum, default_value_t = ChipArg::At24c64)]
    chip: ChipArg,
    /// Override the capacity in bytes
    #[arg(long, value_parser = parse_number::<u32>)]
    capacity: Option<u32>,
    /// Override the page size in bytes
    #[arg(long, value_parser = parse_number::<u16>)]
    page_size: Option<u16>,
    /// Override the write-cycle time in milliseconds
    #[arg(long)]
    write_cycle_ms: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a range and print it as a hex dump
    Read {
        #[arg(value_parser = parse_number::<u16>)]
        start: u16,
        #[arg(value_parser = parse_number::<usize>)]
        length: usize,
    },
    /// Write bytes starting at an address
    Write {
        #[arg(value_parser = parse_number::<u16>)]
        start: u16,
        #[arg(required = true, value_parser = parse_number::<u8>)]
        bytes: Vec<u8>,
        /// Read the range back and compare
        #[arg(long)]
        verify: bool,
    },
    /// Print the whole chip as a hex dump
    Dump,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChipArg {
    #[value(name = "24c32")]
    At24c32,
    #[value(name = "24c64")]
    At24c64,
    #[value(name = "24c128")]
    At24c128,
    #[value(name = "24c256")]
    At24c256,
    #[value(name = "24c512")]
    At24c512,
}

impl From<ChipArg> for Chip {
    fn from(value: ChipArg) -> Self {
        match value {
            ChipArg::At24c32 => Chip::At24c32,
            ChipArg::At24c64 => Chip::At24c64,
            ChipArg::At24c128 => Chip::At24c128,
            ChipArg::At24c256 => Chip::At24c256,
            ChipArg::At24c512 => Chip::At24c512,
        }
    }
}

// Linux caps a single I2C message well below the largest chip.
const DUMP_BLOCK: usize = 256;

fn parse_number<T: TryFrom<u64>>(s: &str) -> Result<T, String> {
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    }
    .map_err(|e| format!("{s}: {e}"))?;
    T::try_from(value).map_err(|_| format!("{s}: out of range"))
}

fn builder(args: &Args) -> EepromBuilder {
    let mut builder = EepromBuilder::from(Chip::from(args.chip)).with_bus_address(args.address);
    if let Some(capacity) = args.capacity {
        builder = builder.with_capacity(capacity);
    }
    if let Some(page_size) = args.page_size {
        builder = builder.with_page_size(page_size);
    }
    if let Some(ms) = args.write_cycle_ms {
        builder = builder.with_write_cycle(Duration::from_millis(ms));
    }
    builder
}

fn hex_dump(start: usize, data: &[u8]) {
    for (i, line) in data.chunks(16).enumerate() {
        let bytes: Vec<String> = line.iter().map(|b| format!("{b:02x}")).collect();
        println!("{:04x}: {}", start + i * 16, bytes.join(" "));
    }
}

/// Splits `length` bytes at `start` into `(start, length)` pieces of at most [DUMP_BLOCK].
fn blocks(start: usize, length: usize) -> impl Iterator<Item = (usize, usize)> {
    (start..start + length)
        .step_by(DUMP_BLOCK)
        .map(move |block| (block, DUMP_BLOCK.min(start + length - block)))
}

/// Reads a range one I2C message-sized block at a time, stopping after a short read.
fn read_blocks<B, D>(
    eeprom: &mut EepromDevice<B, D>,
    start: u16,
    length: usize,
) -> Result<Vec<u8>, Box<dyn Error>>
where
    B: EepromBus,
    B::Error: std::fmt::Debug + 'static,
    D: embedded_hal::delay::DelayNs,
{
    eeprom.chip().check_range::<B::Error>(start, length)?;
    let mut data = Vec::with_capacity(length);
    for (block, size) in blocks(start as usize, length) {
        let chunk = eeprom.read(block as u16, size)?;
        data.extend_from_slice(&chunk);
        if chunk.len() < size {
            log::warn!("Short read at 0x{:04x}", block + chunk.len());
            break;
        }
    }
    Ok(data)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    // Open the I2C bus; it is closed when `eeprom` goes out of scope
    let i2c = linux_embedded_hal::I2cdev::new(&args.path)?;
    let delay = linux_embedded_hal::Delay;
    let mut eeprom = builder(&args).build(HalBus::new(i2c), delay)?;
    log::info!(
        "EEPROM at 0x{:02x} on {}: {} bytes, {} byte pages",
        eeprom.chip().bus_address(),
        args.path,
        eeprom.chip().capacity(),
        eeprom.chip().page_size()
    );
    match args.command {
        Command::Read { start, length } => {
            let data = read_blocks(&mut eeprom, start, length)?;
            if data.len() < length {
                log::warn!("Transport delivered {}/{} bytes", data.len(), length);
            }
            hex_dump(start as usize, &data);
        }
        Command::Write {
            start,
            bytes,
            verify,
        } => {
            eeprom.write(start, &bytes)?;
            log::info!("Wrote {} bytes at 0x{:04x}", bytes.len(), start);
            if verify {
                let readback = read_blocks(&mut eeprom, start, bytes.len())?;
                if let Some(offset) = bytes
                    .iter()
                    .zip(&readback)
                    .position(|(a, b)| a != b)
                    .or((readback.len() < bytes.len()).then_some(readback.len()))
                {
                    return Err(format!(
                        "Verification failed at 0x{:04x}",
                        start as usize + offset
                    )
                    .into());
                }
                log::info!("Verified {} bytes", bytes.len());
            }
        }
        Command::Dump => {
            let capacity = eeprom.chip().capacity() as usize;
            let data = read_blocks(&mut eeprom, 0, capacity)?;
            hex_dump(0, &data);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
