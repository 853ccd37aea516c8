pub mod bzip2;
pub mod gzip;
pub mod xz;
pub mod zstd;
