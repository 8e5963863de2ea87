//! Domain services
//!
//! Signature catalog and the sniffer that evaluates it.

mod header_sniffer;
mod signature_registry;

pub use header_sniffer::HeaderSniffer;
pub use signature_registry::SignatureRegistry;
