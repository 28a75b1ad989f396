//! Outbound ports - Interfaces that the application requires from external systems

mod random_port;
mod repository_port;

pub use random_port::RandomPort;
pub use repository_port::{ContentStorePort, StoreError};

#[cfg(test)]
pub use random_port::MockRandomPort;
#[cfg(test)]
pub use repository_port::MockContentStorePort;
