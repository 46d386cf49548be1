pub mod bits;
pub mod dialog;
