//! Inverse Kinematics module
//!
//! Joint limits, arcball helpers and the CCD solver. Everything operates on
//! nodes of a [`SceneGraph`](crate::scene::SceneGraph).

pub mod arcball;
pub mod chain;
pub mod constraint;
pub mod joint;
pub mod solver;

pub use arcball::Arcball;
pub use chain::IkChain;
pub use joint::{JointConstraints, JointType};
pub use solver::{CcdConfig, CcdSolver, SolveResult};
