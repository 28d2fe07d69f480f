pub mod contact;
pub mod newsletter;
