#![warn(clippy::pedantic)]

pub mod memory;

pub use memory::{InMemory, SnapshotError};

#[cfg(test)]
mod tests {
    pub mod data;
}
