pub mod environment;
pub mod locales;
pub mod settings;

pub use environment::{Environment, UnknownEnvironment};
pub use settings::{
    CacheSettings, DatabaseEngine, DatabaseSettings, LocaleSettings, ProductSettings, Settings,
    UnknownEngine,
};
