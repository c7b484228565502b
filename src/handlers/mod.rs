pub mod diagnostic;
pub mod health;
pub mod home;
pub mod injury;
