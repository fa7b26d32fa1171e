pub mod credit;
pub mod qawaem;
