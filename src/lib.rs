pub mod crypto;
pub mod error;
pub mod handler;
pub mod keydata;
pub mod secboot;
pub mod store;

pub use error::{Error, SelectKeyError};
pub use handler::{register, PlainkeyHandler, PLATFORM_NAME};
pub use store::{add_platform_keys, default_store, set_platform_keys, PlatformKeyStore};
