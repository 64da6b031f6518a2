mod cmd_error;
mod service_error;

pub use cmd_error::*;
pub use service_error::*;
