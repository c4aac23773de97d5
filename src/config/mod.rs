mod builtin;
mod load;
mod save;
mod types;

pub use builtin::{BUILTIN_SHEETS, BuiltinSheet, builtin_config};
pub use load::LoadedConfig;
pub use save::save_config;
pub use types::{SheetConfig, SlicerConfig};
