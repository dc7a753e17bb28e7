pub mod mechanic;
