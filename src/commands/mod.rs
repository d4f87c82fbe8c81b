pub mod extract;
pub mod inventory;
pub mod normalize;
