//! labtabs fragment loading
//!
//! A pane keyed `day1` is filled from the document `day1.html`, using the
//! inner markup of that document's element with `id="day1"`.

mod error;
mod extract;
mod source;

pub use error::FragmentError;
pub use extract::extract_fragment;
pub use source::{fragment_file_name, FragmentSource, HttpFragmentSource, HttpOptions};

pub type Result<T> = std::result::Result<T, FragmentError>;
