//! Asset repositories.
//!
//! - [`FileSystemRepository`]: a directory of `<asset>.csv` files
//! - [`InMemoryRepository`]: histories held in memory, mostly for tests

mod csv_source;
mod filesystem;
mod memory;

pub use csv_source::{load_csv, parse_timestamp, SnapshotWriter};
pub use filesystem::FileSystemRepository;
pub use memory::InMemoryRepository;
