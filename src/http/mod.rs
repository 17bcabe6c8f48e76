//! HTTP protocol layer module
//!
//! Response builders and content-type inference, kept apart from routing decisions.

pub mod mime;
pub mod response;

pub use response::{
    build_404_response, build_500_response, build_file_response, build_redirect_response,
};
