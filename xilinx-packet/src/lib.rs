//! Decoder for the configuration packet stream of 7-series style Xilinx
//! bitstreams.
//!
//! The stream starts after the `aa995566` sync word and consists of type 1
//! and type 2 packet headers, each followed by its payload words. Writes of a
//! single word to CMD, FAR, CTL0, COR0 and COR1 are decoded into their
//! fields; bulk payloads are skipped.

pub mod bits;
mod error;
pub mod packet;
pub mod regs;
mod render;
pub mod value;

pub use error::{DecodeError, DecodeFailure};
pub use packet::{Header, PacketParser, Record, decode};
pub use regs::{Opcode, Reg, command_name, register_name};
pub use render::WithOffset;
pub use value::{RegValue, decode_value};
