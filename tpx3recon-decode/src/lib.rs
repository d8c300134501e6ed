//! tpx3recon-decode: bit-level packet decoding and chunked stream walking
//! for TPX3 telemetry.

mod decoder;
mod packet;
mod stream_walker;

pub use decoder::{
    decode_gts, decode_pixel, decode_spidr_control, decode_tdc, decode_tpx3_control,
    decode_unknown, decode_word,
};
pub use packet::Tpx3Word;
pub use stream_walker::{walk, WalkOutcome};
