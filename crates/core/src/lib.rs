pub mod capture;
pub mod presentation;
pub mod recognition;
pub mod session;
pub mod shared;
