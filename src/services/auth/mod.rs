pub mod claims;
pub mod jwt;
pub mod session;

pub use claims::{SessionClaims, UserClaims};
pub use jwt::TokenCodec;
pub use session::{
    IssuedAccess, IssuedSession, LoginCredentials, SessionService, SignupCandidate, UserProfile,
};
