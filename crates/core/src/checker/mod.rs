pub mod context;
pub mod contract_checker;
pub mod discovery;
pub mod registry;
pub mod traits;
pub mod validator;

pub use context::AnalysisContext;
pub use contract_checker::ContractChecker;
pub use discovery::{discover, CandidateRecord};
pub use registry::CheckerRegistry;
pub use traits::Checker;
pub use validator::{validate, ValidationOutcome};
