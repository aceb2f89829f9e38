//! Browser notification sink: failures (and signatures) block on `window.alert`,
//! everything else goes to the console.

use lib_core::{Notice, Notifier};

#[derive(Clone, Copy, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, notice: Notice) {
        if !notice.is_failure() && !notice.action.announces_success() {
            log::info!("{}", notice.text());
            return;
        }
        if notice.is_failure() {
            log::error!("{}", notice.text());
        }
        match web_sys::window() {
            Some(window) => {
                if let Err(e) = window.alert_with_message(&notice.text()) {
                    log::warn!("Failed to show alert: {:?}", e);
                }
            }
            None => log::warn!("No window available for alert"),
        }
    }
}
