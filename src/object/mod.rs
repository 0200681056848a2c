//! Agent wrappers and the identity cache that hands them out.

pub mod cache;
pub mod human;
pub mod info;

pub use cache::AgentCache;
pub use human::{Citizen, Human, Pedestrian};
pub use info::Infos;
