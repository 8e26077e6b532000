//! Ownership and mode bits of newly created files.

mod login;
mod mode;
mod permission;

pub use login::{
    AuthType, FixedIdentity, Identity, IdentityError, IdentityProvider, ParseAuthTypeError,
    SystemLoginProvider,
};
pub use mode::{Mode, ParseUmaskError, Umask};
pub use permission::Permission;
