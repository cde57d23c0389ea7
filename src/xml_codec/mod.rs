mod decode;
mod element;
mod encode;

pub use decode::decode_document;
pub use element::Element;
pub use encode::encode_document;
