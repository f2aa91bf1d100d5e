pub mod error;
pub mod vws;
pub mod vws_config;
pub mod vws_constant;
pub mod vws_signer;
pub mod vws_string_to_sign;
pub mod vws_target;

pub use error::*;
pub use vws::*;
pub use vws_config::*;
pub use vws_constant::*;
pub use vws_signer::*;
pub use vws_string_to_sign::*;
pub use vws_target::*;
