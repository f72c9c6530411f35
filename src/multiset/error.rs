use thiserror::Error;

/// The errors that ordered queries on a multiset can produce.
///
/// "No predecessor/successor exists" is not an error; it is the valid `None`
/// result for the extreme elements. Only asking about an element that is not
/// stored at all is rejected.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("the element is not present in the multiset")]
    ElementNotFound,
}
