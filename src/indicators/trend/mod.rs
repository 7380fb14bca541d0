pub mod sma;
