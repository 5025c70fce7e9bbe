//! Where failed interactions are reported to the user.

use crate::errors::ClientError;

pub trait Notifier {
    fn notify(&self, error: &ClientError);
}

/// Reports failures through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, error: &ClientError) {
        log::warn!("{}", error.user_message());
    }
}

impl<F> Notifier for F
where
    F: Fn(&ClientError),
{
    fn notify(&self, error: &ClientError) {
        self(error)
    }
}
