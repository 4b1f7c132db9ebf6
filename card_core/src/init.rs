//! One-time animation plugin registration.
//!
//! The host calls [`register_plugins`] once at startup, before any binder
//! attaches. Registration is idempotent and order independent.

use std::cell::RefCell;
use std::collections::BTreeSet;

use tracing::info;

use crate::error::AttachError;

/// Optional engine capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Plugin {
    /// Starting timelines when an element scrolls into view.
    ScrollTrigger,
    /// Splitting text into individually animated words.
    SplitText,
}

// UI-thread registry
thread_local! {
    static REGISTERED: RefCell<Option<BTreeSet<Plugin>>> = const { RefCell::new(None) };
}

pub fn register_plugins(plugins: &[Plugin]) {
    REGISTERED.with(|registered| {
        let mut registered = registered.borrow_mut();
        let set = registered.get_or_insert_with(BTreeSet::new);
        set.extend(plugins.iter().copied());
        info!(plugins = ?set, "animation plugins registered");
    });
}

pub fn is_initialized() -> bool {
    REGISTERED.with(|registered| registered.borrow().is_some())
}

pub fn is_registered(plugin: Plugin) -> bool {
    REGISTERED.with(|registered| {
        registered
            .borrow()
            .as_ref()
            .is_some_and(|set| set.contains(&plugin))
    })
}

/// Fails with the first of `plugins` that has not been registered.
pub fn require(plugins: &[Plugin]) -> Result<(), AttachError> {
    match plugins.iter().copied().find(|&plugin| !is_registered(plugin)) {
        Some(missing) => Err(AttachError::MissingPlugin(missing)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_is_idempotent() {
        std::thread::spawn(|| {
            assert!(!is_initialized());

            register_plugins(&[Plugin::SplitText]);
            register_plugins(&[Plugin::ScrollTrigger, Plugin::SplitText]);
            register_plugins(&[]);

            assert!(is_initialized());
            assert!(is_registered(Plugin::ScrollTrigger));
            assert!(is_registered(Plugin::SplitText));
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_require_names_missing_plugin() {
        std::thread::spawn(|| {
            let both = [Plugin::ScrollTrigger, Plugin::SplitText];
            assert_eq!(
                require(&both),
                Err(AttachError::MissingPlugin(Plugin::ScrollTrigger))
            );

            register_plugins(&[Plugin::ScrollTrigger]);
            assert_eq!(
                require(&both),
                Err(AttachError::MissingPlugin(Plugin::SplitText))
            );

            register_plugins(&[Plugin::SplitText]);
            assert_eq!(require(&both), Ok(()));
        })
        .join()
        .unwrap();
    }
}
