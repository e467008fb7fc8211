use crate::tools::email::{SMTP_LOGIN_ARG, send_email};
use crate::tools::env_args::retrieve_arg_value;
use dto::member::Member;
use std::sync::Arc;

/// Where "member X should hear about this" ends up.
///
/// Fire-and-forget: implementations swallow and log their own failures.
/// A missed notification never undoes an already-committed change.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, member: &Member, subject: &str, body: &str);
}

/// Emails the member over SMTP, off the caller's thread.
pub struct EmailNotificationSink;

impl NotificationSink for EmailNotificationSink {
    fn notify(&self, member: &Member, subject: &str, body: &str) {
        let member_id = *member.id();
        let recipient = member.email_address().clone();
        let subject = subject.to_owned();
        let body = body.to_owned();

        std::thread::spawn(move || match rocket::tokio::runtime::Runtime::new() {
            Ok(runtime) => {
                let recipients = [recipient.as_str()];
                let sending = send_email(&recipients, &subject, &body);
                if let Err(error) = runtime.block_on(sending) {
                    warn!("Couldn't notify member [member: {member_id}]\n{error:#?}");
                }
            }
            Err(error) => warn!("Couldn't start the notification runtime\n{error:#?}"),
        });
    }
}

/// Logs instead of delivering. Used when no SMTP relay is configured.
pub struct LoggingNotificationSink;

impl NotificationSink for LoggingNotificationSink {
    fn notify(&self, member: &Member, subject: &str, body: &str) {
        info!(
            "Notification [member: {}, subject: {subject}]: {body}",
            member.id()
        );
    }
}

pub fn build_notification_sink() -> Arc<dyn NotificationSink> {
    if retrieve_arg_value(SMTP_LOGIN_ARG).is_some() {
        info!("Notifying members by email.");
        Arc::new(EmailNotificationSink)
    } else {
        info!("No SMTP relay configured, notifications are logged only.");
        Arc::new(LoggingNotificationSink)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    pub struct RecordedNotification {
        pub member_id: i32,
        pub subject: String,
        pub body: String,
    }

    /// Keeps every notification so tests can assert on what was (not) sent.
    #[derive(Default)]
    pub struct RecordingNotificationSink {
        notifications: Mutex<Vec<RecordedNotification>>,
    }

    impl NotificationSink for RecordingNotificationSink {
        fn notify(&self, member: &Member, subject: &str, body: &str) {
            self.notifications
                .lock()
                .unwrap()
                .push(RecordedNotification {
                    member_id: *member.id(),
                    subject: subject.to_owned(),
                    body: body.to_owned(),
                });
        }
    }

    impl RecordingNotificationSink {
        pub fn count(&self) -> usize {
            self.notifications.lock().unwrap().len()
        }

        pub fn subjects_for(&self, member_id: i32) -> Vec<String> {
            self.notifications
                .lock()
                .unwrap()
                .iter()
                .filter(|notification| notification.member_id == member_id)
                .map(|notification| notification.subject.clone())
                .collect()
        }
    }

    mod build_notification_sink {
        use crate::notification::build_notification_sink;
        use crate::tools::env_args::with_env_args;
        use dto::member::tests::jon_doe;

        #[test]
        fn logging_sink_without_smtp_configuration() {
            let sink = with_env_args(vec![], build_notification_sink);
            // A logging sink never touches the network; exercising it is safe.
            sink.notify(&jon_doe(), "Welcome", "Welcome to the gym!");
        }
    }
}
