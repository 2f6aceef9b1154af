pub mod animation;
pub mod config;
pub mod errors;
pub mod notifications;
pub mod predictions;
pub mod preferences;
pub mod requests;
pub mod transforms;
pub mod validation;

pub use animation::*;
pub use config::*;
pub use errors::*;
pub use notifications::*;
pub use predictions::*;
pub use preferences::*;
pub use requests::*;
pub use transforms::*;
pub use validation::*;
