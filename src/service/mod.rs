pub mod cancel;
pub mod fill;
