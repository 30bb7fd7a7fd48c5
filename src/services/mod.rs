pub mod create2;
pub mod fixtures;
pub mod hashing;
pub mod permit_service;
pub mod pricing;
pub mod scale;
