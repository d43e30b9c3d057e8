pub mod bokadirekt;
