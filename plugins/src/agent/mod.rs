pub mod http;
mod lines;

pub use http::HttpAgent;
pub use lines::LineBuffer;
