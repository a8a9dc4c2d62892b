// tests/property/main.rs

mod plan;
