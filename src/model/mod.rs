pub mod mc;
pub mod mmca;
