//! Input image decoding.

pub(crate) mod decode;
