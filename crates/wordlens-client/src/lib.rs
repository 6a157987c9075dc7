mod client;

pub use client::WordnikClient;
