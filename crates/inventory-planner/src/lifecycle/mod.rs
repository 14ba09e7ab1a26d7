//! # Session Lifecycle
//!
//! One [`InventorySession`] per client session: it starts the three store
//! tasks, hands the stores to whoever reads or dispatches into them, and
//! shuts the tasks down again.
//!
//! ```rust,ignore
//! let session = InventorySession::start(service, &ClientConfig::default());
//! session.raw_materials.list().await?;
//! session.products.select_detail(ProductId(1)).await?;
//! let candidates = session.available_raw_materials();
//! session.shutdown().await?;
//! ```

pub mod session;

pub use session::{InventorySession, SessionError};
