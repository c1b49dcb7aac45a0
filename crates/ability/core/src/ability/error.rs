//! Activation rejection reasons.

/// Why an activation request was refused.
///
/// Rejections are expected gameplay outcomes, not failures: the public
/// activation API reports them as a boolean and this enum only surfaces
/// through structured logs and internal checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ActivationRejection {
    /// Another cast is already in progress.
    #[error("another cast is already in progress")]
    AlreadyCasting,

    /// The ability's cooldown has not elapsed.
    #[error("ability is on cooldown")]
    OnCooldown,

    /// The activation predicate refused the caster/target pair.
    #[error("activation requirements not met")]
    NotAllowed,
}
