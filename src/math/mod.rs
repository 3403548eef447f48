pub mod fermi;
pub mod linalg;
