pub mod fake_lister;
pub mod fixtures;

pub use fake_lister::{FakeLister, FakeListerStats, ListCall};
