pub mod snapshot;

pub use snapshot::GameSnapshot;
