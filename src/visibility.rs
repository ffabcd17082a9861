//! Chat composer visibility checks.
//!
//! The composer is rendered from [`ComposerState`], so these checks should
//! never find anything to fix. Each repair is logged at `warn` so the path
//! that left the composer unusable can be tracked down.

use std::time::Duration;

pub const REPAIR_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComposerState {
    pub input_disabled: bool,
    pub container_hidden: bool,
    pub send_disabled: bool,
}

impl ComposerState {
    /// Usable for the next message: everything enabled and shown.
    pub fn ready() -> Self {
        Self::default()
    }

    pub fn sending() -> Self {
        Self {
            send_disabled: true,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repair {
    InputEnabled,
    ContainerShown,
    SendEnabled,
}

/// Re-assert a usable composer. A disabled send control is left alone while
/// a send is still pending.
pub fn repair(composer: &mut ComposerState, sending: bool) -> Vec<Repair> {
    let mut repairs = Vec::new();
    if composer.input_disabled {
        composer.input_disabled = false;
        repairs.push(Repair::InputEnabled);
    }
    if composer.container_hidden {
        composer.container_hidden = false;
        repairs.push(Repair::ContainerShown);
    }
    if composer.send_disabled && !sending {
        composer.send_disabled = false;
        repairs.push(Repair::SendEnabled);
    }
    for fix in &repairs {
        tracing::warn!(?fix, "chat composer was unusable, repaired");
    }
    repairs
}

pub fn needs_repair(composer: &ComposerState, sending: bool) -> bool {
    composer.input_disabled || composer.container_hidden || (composer.send_disabled && !sending)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_composer_is_untouched() {
        let mut composer = ComposerState::ready();
        assert!(repair(&mut composer, false).is_empty());
        let mut busy = ComposerState::sending();
        assert!(!needs_repair(&busy, true));
        assert!(repair(&mut busy, true).is_empty());
        assert!(busy.send_disabled);
    }

    #[test]
    fn everything_broken_is_restored() {
        let mut composer = ComposerState {
            input_disabled: true,
            container_hidden: true,
            send_disabled: true,
        };
        assert!(needs_repair(&composer, false));
        let repairs = repair(&mut composer, false);
        assert_eq!(
            repairs,
            vec![Repair::InputEnabled, Repair::ContainerShown, Repair::SendEnabled]
        );
        assert_eq!(composer, ComposerState::ready());
    }

    #[test]
    fn stale_send_lock_is_released_once_idle() {
        let mut composer = ComposerState::sending();
        assert!(needs_repair(&composer, false));
        assert_eq!(repair(&mut composer, false), vec![Repair::SendEnabled]);
    }
}
