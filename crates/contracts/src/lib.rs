use override_guard::contract::InterfaceContract;

pub mod slog_handler;

/// Ids of the built-in contracts checked when none are selected explicitly
pub const DEFAULT_CONTRACTS: &[&str] = &["slog-handler"];

/// Returns all built-in contracts
pub fn all_contracts() -> Vec<InterfaceContract> {
    vec![
        slog_handler::handler(),
        slog_handler::handler_with_attrs(),
        slog_handler::handler_conformance(),
    ]
}

/// Built-in contracts enabled by default
pub fn default_contracts() -> Vec<InterfaceContract> {
    all_contracts()
        .into_iter()
        .filter(|c| DEFAULT_CONTRACTS.contains(&c.id().as_str()))
        .collect()
}
