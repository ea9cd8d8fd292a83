use std::sync::Arc;
use validator::Validate;

use crate::error::HandlerError;
use crate::handlers::run_store_op;
use crate::models::notification::{
    NewNotificationCommand, Notification, NotificationRegistration,
    NotificationRegistrationDataCommand,
};
use crate::services::{DataStore, PushNotificationService};
use crate::utils::CancellationSignal;

/// Handles push token registration and admin-issued notifications.
pub struct NotificationRegistrationDataHandler {
    store: Arc<dyn DataStore>,
    push: Arc<dyn PushNotificationService>,
}

impl NotificationRegistrationDataHandler {
    pub fn new(store: Arc<dyn DataStore>, push: Arc<dyn PushNotificationService>) -> Self {
        Self { store, push }
    }

    /// Creates the (channel, observer) registration, or overwrites its token if one exists.
    pub async fn handle_registration(
        &self,
        command: NotificationRegistrationDataCommand,
        cancel: &CancellationSignal,
    ) -> Result<(), HandlerError> {
        command.validate()?;

        let existing = run_store_op(
            cancel,
            self.store
                .find_notification_registration(&command.channel_name, command.observer_id),
        )
        .await?;

        match existing {
            Some(mut registration) => {
                registration.token = command.token;
                run_store_op(cancel, self.store.update_notification_registration(&registration))
                    .await?;
                log::info!(
                    "Refreshed push token for observer {} on channel {}",
                    registration.observer_id,
                    registration.channel_name
                );
            }
            None => {
                let registration = NotificationRegistration::from(command);
                run_store_op(cancel, self.store.insert_notification_registration(&registration))
                    .await?;
                log::info!(
                    "Registered observer {} on channel {}",
                    registration.observer_id,
                    registration.channel_name
                );
            }
        }

        Ok(())
    }

    /// Persists the notification, then pushes it. Push failures are logged, never returned.
    pub async fn handle_new_notification(
        &self,
        command: NewNotificationCommand,
        cancel: &CancellationSignal,
    ) -> Result<(), HandlerError> {
        let notification = Notification::new(command);
        run_store_op(cancel, self.store.insert_notification(&notification)).await?;
        log::info!(
            "Stored notification {} from admin {} for {} recipient(s)",
            notification.notification_id,
            notification.sender_admin_id,
            notification.recipients.len()
        );

        let dispatch = self.push.send(
            &notification.channel,
            &notification.recipients,
            &notification.title,
            &notification.message,
            &notification.from,
        );

        match cancel.guard(dispatch).await {
            Some(Ok(report)) => log::info!(
                "Notification {} pushed: {} delivered, {} failed",
                notification.notification_id,
                report.success,
                report.failure
            ),
            Some(Err(e)) => log::warn!(
                "Notification {} stored but push failed: {}",
                notification.notification_id,
                e
            ),
            None => log::warn!(
                "Notification {} stored but push was cancelled",
                notification.notification_id
            ),
        }

        Ok(())
    }
}
