/// Transform stack misuse.
///
/// Both variants are caller defects (mismatched push/pop), never transient conditions.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TransformError {
    /// `pop` was called with no matching `push`.
    #[error("transform stack underflow: pop without matching push")]
    Underflow,

    /// A frame finished while saved transforms were still live.
    #[error("transform stack unbalanced at end of frame: {depth} saved transform(s) left")]
    Unbalanced { depth: usize },
}
