/*!
Data structures of BGP messages and the network primitives they carry.
*/
pub mod bgp;
pub mod network;

pub use bgp::*;
pub use network::*;
