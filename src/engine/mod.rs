pub mod filter;
pub mod normalize;
pub mod scoring;
