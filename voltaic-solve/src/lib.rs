pub mod ida;
pub mod observe;
