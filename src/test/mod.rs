
pub use encoder::encode;
pub use strategies::{arbitrary_signature_text, sig_type};
