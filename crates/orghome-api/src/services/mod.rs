//! Page-assembly services.

pub mod enrichment;
pub mod markup;
pub mod visibility;
