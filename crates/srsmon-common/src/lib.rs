//! Value types shared between the status collector and the agent harness.

pub mod types;

#[cfg(test)]
mod tests;
