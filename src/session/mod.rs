pub mod input;
pub mod result;
pub mod timer;
pub mod typing;
