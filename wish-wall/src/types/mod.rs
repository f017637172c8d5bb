mod environment;
mod error;

pub use environment::{Environment, DEFAULT_IP_LOOKUP_URL};
pub use error::{WishError, WishResult};
