pub use super::factories::{ColumnFactory, ValueFactory};

pub struct Factory;

impl Factory {
    pub fn column() -> ColumnFactory {
        ColumnFactory::new()
    }

    pub fn values() -> ValueFactory {
        ValueFactory::new()
    }
}
