use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use embedded_hal::delay::DelayNs;
use romburn::bus::{BitBangBus, RecordingDelay, SimulatedEeprom, ThreadDelay};
use romburn::config::{ProgrammerConfig, Timing, dump_range_from_bounds, parse_address};
use romburn::{CONTROL_STORE, DeviceImage, Programmer, RomEncoder, Variant};

#[derive(Parser, Debug)]
#[command(
    name = "romburn",
    about = "Synthesize a ROM image, program it into a simulated EEPROM and dump it back."
)]
struct Cli {
    /// Which ROM to build.
    #[arg(value_enum)]
    variant: Variant,

    /// First address of the dump (0x.., $.., 0o.., @.. or decimal).
    #[arg(long, value_name = "ADDR", value_parser = address)]
    dump_start: Option<u32>,

    /// End of the dump, exclusive. Defaults to the device size.
    #[arg(long, value_name = "ADDR", value_parser = address)]
    dump_end: Option<u32>,

    /// Wait after each write pulse for the device's write cycle.
    #[arg(long, value_name = "MS", default_value_t = Timing::default().write_hold_ms)]
    write_hold_ms: u32,

    /// Address and read settle time.
    #[arg(long, value_name = "US", default_value_t = Timing::default().address_settle_us)]
    settle_us: u32,

    /// Sleep for the requested delays instead of only accounting for them.
    #[arg(long)]
    realtime: bool,

    /// Also write the synthesized binary image here.
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Print the control-store sequences and exit.
    #[arg(long)]
    listing: bool,

    /// Render the display for `--value` to a PNG and exit.
    #[cfg(feature = "screenshot")]
    #[arg(long, value_name = "PATH", requires = "value")]
    preview: Option<PathBuf>,

    /// Display address to preview.
    #[cfg(feature = "screenshot")]
    #[arg(long, value_name = "ADDR", value_parser = address)]
    value: Option<u32>,
}

fn address(text: &str) -> std::result::Result<u32, String> {
    parse_address(text).map_err(|e| e.to_string())
}

impl Cli {
    fn config(&self, encoder: &dyn RomEncoder) -> ProgrammerConfig {
        let timing = Timing {
            address_settle_us: self.settle_us,
            read_settle_us: self.settle_us,
            write_hold_ms: self.write_hold_ms,
            ..Timing::default()
        };
        ProgrammerConfig {
            timing,
            dump_range: dump_range_from_bounds(
                self.dump_start,
                self.dump_end,
                encoder.device_size(),
            ),
        }
    }
}

fn burn<D: DelayNs, W: Write>(
    encoder: &dyn RomEncoder,
    config: &ProgrammerConfig,
    delay: D,
    out: &mut W,
) -> Result<SimulatedEeprom> {
    let device = SimulatedEeprom::new(encoder.device_size() as usize);
    let bus = BitBangBus::new(device, delay, config.timing);
    let bus = Programmer::new(bus, encoder)
        .run(config, out)
        .with_context(|| format!("programming the {} ROM", encoder.name()))?;
    let (device, _) = bus.into_parts();
    Ok(device)
}

#[cfg(feature = "screenshot")]
fn render_preview(cli: &Cli) -> Result<bool> {
    let (Some(path), Some(value)) = (&cli.preview, cli.value) else {
        return Ok(false);
    };
    romburn::preview::save_preview(value as u16, path)
        .with_context(|| format!("writing preview {}", path.display()))?;
    info!("preview of {:#o} written to {}", value, path.display());
    Ok(true)
}

#[cfg(not(feature = "screenshot"))]
fn render_preview(_cli: &Cli) -> Result<bool> {
    Ok(false)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.listing {
        print!("{}", CONTROL_STORE.listing());
        return Ok(());
    }

    if render_preview(&cli)? {
        return Ok(());
    }

    let encoder = cli.variant.encoder();
    let config = cli.config(encoder);
    let image = DeviceImage::synthesize(encoder);

    if let Some(path) = &cli.image {
        image
            .write_to(path)
            .with_context(|| format!("writing image {}", path.display()))?;
        info!("{} image written to {}", encoder.name(), path.display());
    }

    let mut out = io::stdout().lock();
    let device = if cli.realtime {
        burn(encoder, &config, ThreadDelay, &mut out)?
    } else {
        burn(encoder, &config, RecordingDelay::new(), &mut out)?
    };
    out.flush()?;

    match image.first_mismatch(device.contents()) {
        None => info!("{}: device matches the synthesized image", encoder.name()),
        Some(address) => warn!(
            "{}: device differs from the synthesized image at {:#06x}",
            encoder.name(),
            address
        ),
    }
    Ok(())
}
