mod dirty_op;
mod read_op;
pub mod store;
mod write_op;

pub use dirty_op::{Changes, RawChange};
pub use store::AttributeStore;

#[cfg(test)]
mod tests;
