pub mod config;
pub mod logging;

pub mod checksum;
pub mod downloader;
pub mod tool;
pub mod transport;
pub mod url_model;

pub use downloader::{
    download, download_with_progress, DownloadError, DownloadReport, DownloadRequest, Downloader,
    TransferProgress, TransferStatus,
};
