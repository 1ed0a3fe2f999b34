pub mod on_assembly;
pub mod on_error_return_item;
