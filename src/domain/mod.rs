pub mod company;
pub mod personnel;

pub use company::*;
pub use personnel::*;
