pub mod astigmatism;
pub mod decision;
pub mod inputs;
pub mod tuning;
