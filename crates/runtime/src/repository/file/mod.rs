//! File-backed repository implementations.

mod save;

pub use save::FileSaveRepository;
