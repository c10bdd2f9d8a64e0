pub mod enums;
pub mod records;

// Re-export the core types to provide a clean public API.
pub use enums::{GroupKey, Metric, TicketCategory};
pub use records::PreparedSale;
