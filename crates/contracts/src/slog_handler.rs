use override_guard::contract::{DetectionMode, InterfaceContract, RequiredMethod, TypeDescriptor};
use override_guard::model::BasicKind;

const SLOG: &str = "log/slog";

/// `WithAttrs([]slog.Attr) slog.Handler`
fn with_attrs() -> RequiredMethod {
    RequiredMethod::new(
        "WithAttrs",
        vec![TypeDescriptor::slice_of(SLOG, "Attr")],
        vec![TypeDescriptor::named(SLOG, "Handler")],
    )
}

/// `WithGroup(string) slog.Handler`
fn with_group() -> RequiredMethod {
    RequiredMethod::new(
        "WithGroup",
        vec![TypeDescriptor::basic(BasicKind::String)],
        vec![TypeDescriptor::named(SLOG, "Handler")],
    )
}

/// Handlers that embed or satisfy `slog.Handler` must declare both
/// `WithAttrs` and `WithGroup`. Otherwise the embedded handler's versions
/// are called and return a handler that drops the wrapper.
pub fn handler() -> InterfaceContract {
    InterfaceContract::new(SLOG, "Handler", vec![with_attrs(), with_group()])
        .with_id("slog-handler")
        .with_description(
            "Detects slog.Handler wrappers that inherit WithAttrs/WithGroup from an embedded handler",
        )
}

/// Only `WithAttrs` is required; only embedding marks a candidate.
pub fn handler_with_attrs() -> InterfaceContract {
    InterfaceContract::new(SLOG, "Handler", vec![with_attrs()])
        .with_id("slog-handler-with-attrs")
        .with_detection(vec![DetectionMode::Embedding])
        .with_description("Detects slog.Handler wrappers that inherit WithAttrs from an embedded handler")
}

/// Both methods required; candidates found by interface satisfaction alone.
pub fn handler_conformance() -> InterfaceContract {
    InterfaceContract::new(SLOG, "Handler", vec![with_attrs(), with_group()])
        .with_id("slog-handler-conformance")
        .with_detection(vec![DetectionMode::Conformance])
        .with_description(
            "Detects types satisfying slog.Handler without declaring WithAttrs/WithGroup themselves",
        )
}
