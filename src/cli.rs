//! 命令行参数

use std::path::PathBuf;

use clap::Parser;
use dropgallery_core::{AppSettings, PhotoId};

#[derive(Parser, Debug)]
#[command(name = "dropgallery")]
#[command(about = "Drop photos in, get a gallery with camera and exposure details")]
#[command(long_about = "\
Drop photos in, get a gallery with camera and exposure details

Every dropped JPEG, PNG or GIF becomes a gallery card showing the camera,
upload date, pixel dimensions and, when the file carries EXIF data, the
exposure time, aperture and ISO. Directories are expanded to the images they
contain. Files that cannot be decoded are listed as failures instead of
disappearing.")]
#[command(version)]
pub struct Cli {
    /// Image files or directories to drop into the gallery
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Expand dropped directories recursively
    #[arg(long)]
    pub recursive: bool,

    /// Per-file metadata extraction timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Remove the photo with this ID after importing (repeatable)
    #[arg(long = "remove", value_name = "ID")]
    pub remove: Vec<PhotoId>,

    /// Print the gallery as JSON
    #[arg(long)]
    pub json: bool,

    /// Application data directory (settings and logs)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// 命令行选项覆盖设置文件
    pub fn apply_overrides(&self, settings: &mut AppSettings) {
        if self.recursive {
            settings.ingest.recursive = true;
        }
        if let Some(ms) = self.timeout_ms {
            settings.ingest.extraction_timeout_ms = ms;
        }
    }
}
