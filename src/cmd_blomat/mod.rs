pub mod block;
pub mod build;
