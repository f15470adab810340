pub mod admin;
pub mod auth;
pub mod booking;
pub mod contact;
pub mod health;
pub mod room;
pub mod v1;
