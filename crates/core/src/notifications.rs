//! User-facing notification texts.

pub fn subscription_activated(plan_name: &str) -> String {
    format!("Payment received successfully! You are now subscribed to {plan_name}.")
}

pub fn book_payment_received() -> String {
    "Payment received successfully! Your books will come soon.".to_string()
}

/// Sent when a restocked waitlist item lands in the reader's cart.
pub fn waitlist_fulfilled(comic_name: &str, volume_name: &str) -> String {
    format!("A waitlist item is added into the cart: {comic_name} ({volume_name}).")
}

pub fn chapter_unlocked(comic_name: &str, chapter_number: i32, cost: i64) -> String {
    format!("Chapter {chapter_number} of {comic_name} unlocked for {cost} points.")
}
