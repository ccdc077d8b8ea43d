// Persistent Containers
// Each wraps a std collection, hydrates from its backing file on open,
// and only writes when the owner asks it to.

pub mod mapping;
pub mod sequence;
pub mod set;

pub use mapping::PersistentMapping;
pub use sequence::PersistentSequence;
pub use set::PersistentSet;
