pub mod activation_token;
pub mod password_reset_token;
pub mod user;
