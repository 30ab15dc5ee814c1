pub mod slicing;
