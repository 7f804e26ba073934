mod cancel;
mod feedback;
mod get;
mod post;

pub use cancel::*;
pub use feedback::*;
pub use get::*;
pub use post::*;
