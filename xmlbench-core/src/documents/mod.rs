mod article;
mod build_xml;
mod chapter;
mod clause;
mod law;
mod metadata;

pub use article::*;
pub use build_xml::*;
pub use chapter::*;
pub use clause::*;
pub use law::*;
pub use metadata::*;
