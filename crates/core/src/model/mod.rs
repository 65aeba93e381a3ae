pub mod facts;
pub mod loader;
pub mod method_set;
pub mod types;

pub use facts::*;
pub use loader::{discover_unit_files, parse_unit_source};
pub use method_set::{method_set, satisfies_interface, Form, MethodSet};
pub use types::*;
