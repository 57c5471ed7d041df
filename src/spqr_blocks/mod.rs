pub(crate) mod forest;
pub(crate) mod invariants;
pub(crate) mod visualize;

pub mod pertinent;
pub mod skeleton;
