/// Device connectivity as reported by the platform.
///
/// Advisory only: the session logs it but never refuses an action because of it.
pub trait NetworkInfo: Send + Sync {
    /// `None` while the status is still unknown.
    fn is_connected(&self) -> Option<bool>;
}
