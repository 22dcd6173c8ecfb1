pub mod testing;
pub mod validation;
