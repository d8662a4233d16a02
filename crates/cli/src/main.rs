//! RISC-V architectural-test target model CLI.
//!
//! This binary exercises the platform hooks against a compiled test image. It performs:
//! 1. **Run:** Load an ELF, boot, dump the signature region, and write the
//!    `DUT-<platform>.signature` file the external checker reads.
//! 2. **Layout:** Print the resolved layout contract of an image.
//! 3. **Flags:** Print the compiler flags for building tests against a platform.
//! 4. **Platforms:** List the built-in platforms and how each one dumps.
//!
//! The model does not execute the test body; the signature written by `run` is
//! the region's contents as loaded, streamed exactly as the platform would.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rvmodel_core::isa::IsaString;
use rvmodel_core::model::layout::RegStateMarkers;
use rvmodel_core::model::{CompileFlags, MemoryLayout, PlatformKind, TargetModel};
use rvmodel_core::sim::{ElfImage, Signature};
use rvmodel_core::{Config, Hart, Session, System};

#[derive(Parser, Debug)]
#[command(
    name = "rvmodel",
    author,
    version,
    about = "RISC-V architectural-test target model",
    long_about = "Boot, dump, and halt a compiled architectural test the way a target platform would.\n\nExamples:\n  rvmodel run --elf add-01.elf --platform neorv32 --out-dir work/\n  rvmodel layout --elf add-01.elf\n  rvmodel flags --isa RV32IMCZicsr_Zifencei --platform neorv32\n  rvmodel platforms"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Boot an image, stream its signature, and write the signature file.
    Run {
        /// Compiled test image.
        #[arg(short, long)]
        elf: PathBuf,

        /// Platform hooks to use; overrides the config file.
        #[arg(short, long)]
        platform: Option<PlatformKind>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for `DUT-<platform>.signature`.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Log every hook step.
        #[arg(long)]
        trace: bool,

        /// Print session statistics.
        #[arg(long)]
        stats: bool,
    },

    /// Print the layout contract resolved from an image's symbols.
    Layout {
        /// Compiled test image.
        #[arg(short, long)]
        elf: PathBuf,

        /// JSON configuration file (for the trap entry fallback).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print `-march`, `-mabi` and the relocatable-`mtval` define for a test build.
    Flags {
        /// ISA string of the hart; overrides the config file.
        #[arg(short, long)]
        isa: Option<IsaString>,

        /// Platform to build for; overrides the config file.
        #[arg(short, long)]
        platform: Option<PlatformKind>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the built-in platforms.
    Platforms,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            elf,
            platform,
            config,
            out_dir,
            trace,
            stats,
        } => cmd_run(&elf, platform, config.as_deref(), &out_dir, trace, stats),
        Commands::Layout { elf, config } => cmd_layout(&elf, config.as_deref()),
        Commands::Flags {
            isa,
            platform,
            config,
        } => cmd_flags(isa, platform, config.as_deref()),
        Commands::Platforms => {
            cmd_platforms();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

fn init_logging(trace: bool) {
    let default = if trace { "rvmodel_core=trace" } else { "rvmodel_core=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    Ok(match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    })
}

fn cmd_run(
    elf: &Path,
    platform: Option<PlatformKind>,
    config_path: Option<&Path>,
    out_dir: &Path,
    trace: bool,
    stats: bool,
) -> Result<(), Box<dyn Error>> {
    let config = load_config(config_path)?;
    init_logging(trace || config.general.trace);

    let image = ElfImage::load(elf)?;
    let layout = image.layout(&config.layout)?;
    let platform = platform.unwrap_or(config.general.platform);
    let configured = config.general.effective_xlen();
    if image.xlen != configured {
        tracing::info!(image = %image.xlen, config = %configured, "using register width of the image");
    }

    let System { mut bus, monitor } = System::new(&config);
    image.load_into(&mut bus)?;
    check_regstate(&mut bus, layout.regstate);

    let hart = Hart::new(image.xlen, config.general.reset_pc);
    let mut session = Session::new(platform.model(), layout, hart, bus);

    println!("[*] {} on {platform} ({})", elf.display(), image.xlen);
    print_layout(&layout);

    let _ = session.boot()?;
    if trace {
        session.hart().regs.dump();
    }
    let report = session.halt()?;

    let streamed = Signature::from_monitor(&monitor);
    let in_memory = Signature::read_region(session.bus_mut(), layout.signature)?;
    if !streamed.starts_with(&in_memory) {
        tracing::warn!("streamed signature differs from the region contents");
    }

    let path = out_dir.join(Signature::file_name(session.target().name()));
    streamed.write_to(&path)?;
    println!(
        "[*] Wrote {} ({} words, {} padding)",
        path.display(),
        report.data_words,
        report.padding_words
    );

    if stats {
        session.stats().print();
    }
    Ok(())
}

fn check_regstate(bus: &mut rvmodel_core::soc::Bus, markers: Option<RegStateMarkers>) {
    let Some(markers) = markers else { return };
    match markers.matches_target(bus) {
        Ok(true) => {}
        Ok(false) => tracing::warn!("register-state markers do not match this target"),
        Err(e) => tracing::warn!(error = %e, "register-state markers unreadable"),
    }
}

fn cmd_layout(elf: &Path, config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let config = load_config(config_path)?;
    init_logging(config.general.trace);

    let image = ElfImage::load(elf)?;
    let layout = image.layout(&config.layout)?;
    println!("{} ({}, entry {:#x})", elf.display(), image.xlen, image.entry);
    print_layout(&layout);
    Ok(())
}

fn print_layout(layout: &MemoryLayout) {
    let sig = layout.signature;
    println!(
        "  signature    [{:#010x}, {:#010x})  {} bytes",
        sig.begin(),
        sig.end(),
        sig.len()
    );
    match layout.trap_entry {
        Some(entry) => println!("  trap entry   {entry:#010x}"),
        None => println!("  trap entry   (none)"),
    }
    println!("  trap scratch {:#010x}", layout.trap_scratch_base());
    if let Some(hs) = layout.handshake {
        println!("  tohost       {:#010x}", hs.tohost);
        println!("  fromhost     {:#010x}", hs.fromhost);
    }
    if let Some(rs) = layout.regstate {
        println!("  regstate     {:#010x} .. {:#010x}", rs.begin, rs.end);
    }
}

fn cmd_flags(
    isa: Option<IsaString>,
    platform: Option<PlatformKind>,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let config = load_config(config_path)?;
    init_logging(config.general.trace);

    let isa = isa
        .or(config.general.isa)
        .ok_or("no ISA string given (use --isa or general.isa)")?;
    let platform = platform.unwrap_or(config.general.platform);
    println!("{}", CompileFlags::new(platform.model().as_ref(), &isa));
    Ok(())
}

fn cmd_platforms() {
    for kind in PlatformKind::ALL {
        let model = kind.model();
        let profile = model.dump_profile();
        let pad = profile
            .pad_to
            .map_or_else(|| "none".to_string(), |b| format!("{b} bytes"));
        println!(
            "{:<12} output {:#010x}  loop {:?}  padding {}  march {}  rel-tval {:#x}",
            model.name(),
            profile.output_addr,
            profile.termination,
            pad,
            model.march_extensions(),
            model.relocatable_tval_mask()
        );
    }
}
