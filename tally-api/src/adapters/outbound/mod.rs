pub mod postgres;

#[cfg(test)]
mod mock;

#[cfg(test)]
pub use mock::MockStore;
