pub mod column_factory;
pub mod value_factory;

pub use column_factory::ColumnFactory;
pub use value_factory::ValueFactory;

#[cfg(test)]
mod column_factory_test;
#[cfg(test)]
mod value_factory_test;
