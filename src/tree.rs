//! Forest reconstruction, filtering and enumeration.

pub mod builder;
pub mod filter;
pub mod flatten;
pub mod node;
pub mod record;

pub use builder::{build, BuildReport, ForestBuilder};
pub use filter::{filter, NameQuery};
pub use flatten::{count, flatten, Preorder};
pub use node::{link_for, normalize, Node, NodeKind};
pub use record::RemoteRecord;
