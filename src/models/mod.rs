pub mod artifact;
pub mod price;
pub mod token_pair;
pub mod types;
