//! `fatutil`: inspects the long file name chains in a FAT32 disk image.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hadris_fat::lfn::resolver::{DirectoryProvider, Resolved};
use hadris_fat::lfn::{walk::Step, LfnError, Volume};
use hadris_fat::structures::boot_sector::BootSector;
use hadris_fat::structures::fat::Fat32;
use hadris_fat::FatType;

#[derive(Parser)]
#[command(name = "fatutil", about = "Inspect long file names inside a FAT32 image")]
struct Cli {
    /// Path to a raw FAT32 disk image
    image: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the entries of a directory, or the root directory by default
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Resolve a path to its directory cluster and slot index
    Resolve { path: String },
    /// Walk the whole tree, printing one line per entry visited
    Tree,
}

/// A whole FAT32 image held in memory, read directly via slice-backed I/O.
struct Image {
    bytes: Vec<u8>,
    fat: Fat32,
    cluster_size: usize,
    root_cluster: u32,
}

impl Image {
    fn load(path: &PathBuf) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let (bytes_per_sector, sectors_per_cluster, reserved_sectors, sectors_per_fat, root_cluster) = {
            let boot: &BootSector = bytemuck::from_bytes(&bytes[..512]);
            if boot.get_type() != FatType::Fat32 {
                bail!("fatutil only understands FAT32 images");
            }
            let fat32 = boot.as_fat32();
            (
                fat32.bytes_per_sector() as usize,
                fat32.sectors_per_cluster() as usize,
                fat32.reserved_sector_count() as usize,
                fat32.sectors_per_fat() as usize,
                fat32.root_sector(),
            )
        };
        let fat = Fat32::new(
            reserved_sectors * bytes_per_sector,
            sectors_per_fat * bytes_per_sector,
            1,
            bytes_per_sector,
        );
        Ok(Self {
            bytes,
            fat,
            cluster_size: bytes_per_sector * sectors_per_cluster,
            root_cluster,
        })
    }

    fn read_directory(&self, cluster: u32) -> Volume {
        let mut reader = self.bytes.as_slice();
        // A directory rarely spans more than a few dozen clusters; this bound just
        // needs to be large enough to read the whole chain in one shot.
        let size_hint = self.cluster_size * 64;
        Volume::read(&mut reader, &self.fat, self.cluster_size, cluster, size_hint)
    }
}

impl DirectoryProvider for &Image {
    type Dir = Volume;

    fn root_cluster(&self) -> u32 {
        self.root_cluster
    }

    fn open(&mut self, cluster: u32) -> Result<Volume, LfnError> {
        Ok(Image::read_directory(self, cluster))
    }
}

fn print_directory(dir: &Volume) {
    for entry in hadris_fat::lfn::enumerator::Entries::new(dir) {
        let marker = if entry.corrupt { "!" } else { " " };
        println!("{marker}{:>6}  {}", entry.short_index, entry.name);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let image = Image::load(&cli.image)?;

    match cli.command {
        Command::Ls { path } => {
            let mut provider = &image;
            let resolved = hadris_fat::lfn::resolver::resolve(&mut provider, image.root_cluster, &path, false)
                .context("resolving path")?;
            let cluster = match resolved {
                Resolved::Cluster(c) => c,
                Resolved::Entry { cluster, .. } => cluster,
            };
            print_directory(&image.read_directory(cluster));
        }
        Command::Resolve { path } => {
            let mut provider = &image;
            match hadris_fat::lfn::resolver::resolve(&mut provider, image.root_cluster, &path, false)? {
                Resolved::Entry { cluster, index } => {
                    println!("entry:{cluster},{index}");
                }
                Resolved::Cluster(cluster) => {
                    println!("cluster:{cluster}");
                }
            }
        }
        Command::Tree => {
            let mut provider = &image;
            let mut depth = 0usize;
            for step in hadris_fat::lfn::walk::Walk::new(&mut provider, image.root_cluster) {
                match step {
                    Step::Enter { cluster } => {
                        println!("{}[cluster {cluster}]", "  ".repeat(depth));
                        depth += 1;
                    }
                    Step::Visit { entry, .. } => {
                        println!("{}{}", "  ".repeat(depth), entry.name);
                    }
                    Step::Leave { .. } => {
                        depth = depth.saturating_sub(1);
                    }
                }
            }
        }
    }

    Ok(())
}
