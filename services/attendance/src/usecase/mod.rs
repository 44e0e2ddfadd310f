pub mod account;
pub mod attendance;
pub mod bootstrap;
pub mod catalog;
pub mod login;
pub mod report;
pub mod session;

#[cfg(test)]
pub(crate) mod mocks;

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}
