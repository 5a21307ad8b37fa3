pub mod claims;
pub mod errors;
pub mod issuer;
pub mod response;
pub mod secret;

pub use claims::Claims;
pub use errors::TokenError;
pub use issuer::issue_shared_secret_token;
pub use issuer::TokenIssuer;
pub use response::marshal_token_response;
pub use response::TokenResponse;
pub use response::TokenType;
pub use secret::generate_client_secret;
pub use secret::SharedSecret;
