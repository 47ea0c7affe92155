//! Notification events and message templating.
//!
//! Pure functions only: deciding whether an event is enabled, rendering
//! the outbound text, and building a WhatsApp deep link. Actual delivery
//! lives in the integrations layer and is fire-and-forget.

use crate::entities::{client, settings};

/// Order lifecycle moments that may trigger a client notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyEvent {
    /// The order received a quote
    Quoted,
    /// Work on the order started
    InProgress,
    /// The order is ready for pickup
    Ready,
    /// The order became fully paid
    PaymentConfirmed,
}

/// Whether the settings row enables notifications for this event.
pub fn should_notify(settings: &settings::Model, event: NotifyEvent) -> bool {
    match event {
        NotifyEvent::Quoted => settings.notify_quoted,
        NotifyEvent::InProgress => settings.notify_in_progress,
        NotifyEvent::Ready => settings.notify_ready,
        NotifyEvent::PaymentConfirmed => settings.notify_payment,
    }
}

/// Renders the outbound message for an event.
pub fn render_message(
    event: NotifyEvent,
    client: &client::Model,
    order_description: &str,
    shop_name: &str,
) -> String {
    let name = &client.name;
    match event {
        NotifyEvent::Quoted => format!(
            "Hi {name}! Your order \"{order_description}\" has been quoted. \
             Reply here to approve it. - {shop_name}"
        ),
        NotifyEvent::InProgress => format!(
            "Hi {name}! We started working on your order \"{order_description}\". \
             - {shop_name}"
        ),
        NotifyEvent::Ready => format!(
            "Hi {name}! Your order \"{order_description}\" is ready for pickup. \
             - {shop_name}"
        ),
        NotifyEvent::PaymentConfirmed => format!(
            "Hi {name}! We received your payment for \"{order_description}\". \
             Thank you! - {shop_name}"
        ),
    }
}

/// Builds a `wa.me` deep link for a phone number and message.
///
/// Non-digit characters are stripped from the number; returns `None` when
/// no digits remain.
pub fn whatsapp_link(phone: &str, message: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!(
        "https://wa.me/{digits}?text={}",
        urlencoding::encode(message)
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::enums::ClientKind;

    fn sample_client() -> client::Model {
        client::Model {
            id: 1,
            name: "Alice".to_string(),
            kind: ClientKind::Individual,
            email: None,
            phone: Some("+54 9 11 5555-1234".to_string()),
            address: None,
            tax_id: None,
            notes: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn sample_settings() -> settings::Model {
        settings::Model {
            id: 1,
            notify_quoted: true,
            notify_in_progress: false,
            notify_ready: true,
            notify_payment: true,
            digest_email: None,
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_should_notify_follows_toggles() {
        let settings = sample_settings();
        assert!(should_notify(&settings, NotifyEvent::Quoted));
        assert!(!should_notify(&settings, NotifyEvent::InProgress));
        assert!(should_notify(&settings, NotifyEvent::Ready));
        assert!(should_notify(&settings, NotifyEvent::PaymentConfirmed));
    }

    #[test]
    fn test_render_message_mentions_order_and_shop() {
        let client = sample_client();
        let text = render_message(NotifyEvent::Ready, &client, "50 flyers", "CopyShop");
        assert!(text.contains("Alice"));
        assert!(text.contains("50 flyers"));
        assert!(text.contains("CopyShop"));
    }

    #[test]
    fn test_whatsapp_link_strips_formatting() {
        let link = whatsapp_link("+54 9 11 5555-1234", "hello world").unwrap();
        assert!(link.starts_with("https://wa.me/5491155551234?text="));
        // Spaces must be percent-encoded
        assert!(link.contains("hello%20world"));

        assert!(whatsapp_link("n/a", "hi").is_none());
    }
}
