pub mod loader;

pub use loader::{build_resolver, load_config, load_holiday_file};
