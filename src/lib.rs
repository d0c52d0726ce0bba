pub use bytes::Bytes;

mod builder;
mod dynamic;
mod error;
mod number;
mod ops;
mod owned;
mod result;
mod view;

pub mod serial;

pub use builder::*;
pub use dynamic::*;
pub use error::*;
pub use number::*;
pub use ops::*;
pub use owned::*;
pub use result::*;
pub use view::*;

pub use serial::{Codec, Decoder, Encoder, MapAsCodec, MapCodec, MapDecoder, MapEncoder};
