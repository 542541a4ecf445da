#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use panocube_tensor as tensor;

#[doc(inline)]
pub use panocube_image as image;

#[doc(inline)]
pub use panocube_imgproc as imgproc;

#[doc(inline)]
pub use panocube_io as io;
