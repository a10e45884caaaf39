mod strategy_selector;
mod stream_url_resolver;

pub use strategy_selector::StrategySelector;
pub use stream_url_resolver::{encode_uri_component, StreamUrlResolver};
