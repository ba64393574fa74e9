pub mod fixture;
pub mod session;
pub mod surface;
