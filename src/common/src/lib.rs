pub mod choice;
pub mod error;
pub mod model;
pub mod test;
pub mod utility;
