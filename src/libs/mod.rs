pub mod alignment;
pub mod block;
pub mod blosum;
pub mod cluster;
pub mod error;
pub mod io;
pub mod nt;
