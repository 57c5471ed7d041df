// #![warn(missing_docs)]

//! # spqr_trees
//!
//! SPQR trees of biconnected multigraphs, static and dynamic.
//!
//! Based on [`petgraph`](https://docs.rs/petgraph).
//!
//! - [`triconnected`] splits a graph into its triconnected components (Hopcroft and Tarjan, with
//!   the corrections of Gutwenger and Mutzel),
//! - [`spqr_tree::StaticSpqrTree`] arranges them into the SPQR tree of a fixed graph,
//! - [`dynamic_spqr_tree::DynamicSpqrTree`] keeps the tree up to date while edges and subdivision
//!   nodes are inserted,
//! - [`input`] and [`output`] read edge lists and write DOT.
//!
//! ```
//! use spqr_trees::{input::from_str, spqr_tree::StaticSpqrTree};
//!
//! let graph = from_str("0,1\n1,2\n2,0\n").unwrap();
//! let tree = StaticSpqrTree::new(&graph).unwrap();
//! assert_eq!(tree.number_of_s_nodes(), 1);
//! ```

pub mod block_cut;
pub mod dynamic_spqr_tree;
pub mod error;
pub mod input;
pub mod output;
pub mod spqr_blocks;
pub mod spqr_tree;
pub mod triconnected;
pub mod triconnected_blocks;
pub mod types;

#[cfg(test)]
mod testing;

pub use dynamic_spqr_tree::{DynamicOptions, DynamicSpqrTree};
pub use error::SpqrError;
pub use spqr_blocks::{pertinent::PertinentGraph, skeleton::Skeleton};
pub use spqr_tree::StaticSpqrTree;
pub use triconnected_blocks::outside_structures::TriconnectedComponents;
pub use types::EdgeLabel;
pub use types::SkeletonEdge;
pub use types::SpqrNodeType;
pub use types::TreeEdge;
pub use types::TreeGraph;
pub use types::TreeNode;
pub use types::UnGraph;
