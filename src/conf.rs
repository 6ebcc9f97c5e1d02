//! Site settings loaded from `settings/perseus.toml`.

pub use perseus_conf::*;
