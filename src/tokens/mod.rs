pub mod source;

pub use source::{Token, TokenKey, TokenSource};
