pub mod update;

pub use update::{apply, WriteOutcome, WritePlan};
