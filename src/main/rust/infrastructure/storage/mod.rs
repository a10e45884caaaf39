mod json_config_store;

pub use json_config_store::{load_or_default, JsonFileConfigStore};
