pub mod cli;
pub mod config;
pub mod genes;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod report;

pub mod prelude {
    pub use crate::genes::resolver::{HgncResolver, IdentifierResolver};
    pub use crate::model::params::RequestParameters;
    pub use crate::model::results::{CanonicalGeneResult, RawGeneEntry};
}
