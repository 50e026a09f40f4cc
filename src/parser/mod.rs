/*!
parser module contains the wire codecs: header framing, per-type message bodies, OPEN optional
parameters and capabilities, and the byte reading helpers they share.
*/
pub mod bgp;
pub mod utils;

pub use bgp::*;
pub use utils::*;
