//! `gurume shop`: the shop detail view, assembled from two server calls.

use gurume_core::{CountValue, Shop};

use crate::client::{ApiClient, ReviewView};

use super::{or_empty, EMPTY};

/// Fetches a shop and its reviews and prints both.
///
/// # Errors
///
/// Returns an error if either request fails, including 404 for unknown shops.
pub(crate) async fn run_shop(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let (shop, reviews) = tokio::try_join!(client.shop(id), client.reviews(id))?;

    print_shop(&shop);
    println!();
    print_reviews(&reviews);
    Ok(())
}

fn print_shop(shop: &Shop) {
    println!("{} [{}]", shop.name, shop.id);
    println!("  genre:    {}", or_empty(shop.genre_name()));
    println!("  budget:   {}", or_empty(shop.budget_name()));
    println!("  address:  {}", or_empty(shop.address.as_deref()));
    println!("  access:   {}", or_empty(shop.access.as_deref()));
    println!("  open:     {}", or_empty(shop.open.as_deref()));
    println!("  closed:   {}", or_empty(shop.close.as_deref()));
    println!(
        "  capacity: {}",
        shop.capacity
            .as_ref()
            .and_then(CountValue::as_i64)
            .map_or_else(|| EMPTY.to_string(), |c| c.to_string())
    );
    println!("  private room: {}", or_empty(shop.private_room.as_deref()));
    println!("  free drink:   {}", or_empty(shop.free_drink.as_deref()));
    println!("  parking:      {}", or_empty(shop.parking.as_deref()));
    println!("  non-smoking:  {}", or_empty(shop.non_smoking.as_deref()));
    if let Some(photo) = shop.hero_photo() {
        println!("  photo:    {photo}");
    }
    if let Some(url) = shop.urls.as_ref().and_then(|u| u.pc.as_deref()) {
        println!("  url:      {url}");
    }
}

fn print_reviews(reviews: &[ReviewView]) {
    if reviews.is_empty() {
        println!("no reviews yet");
        return;
    }

    println!("reviews ({})", reviews.len());
    for review in reviews {
        println!(
            "- {} by {}  atmosphere: {}  usecase: {}",
            review.inserted_at.format("%Y-%m-%d"),
            review.employee_id,
            score_with_label(review.atmosphere, review.labels.atmosphere.as_deref()),
            score_with_label(review.usecase, review.labels.usecase.as_deref()),
        );
        if let Some(comment) = review.comment.as_deref() {
            println!("  {comment}");
        }
    }
}

fn score_with_label(score: Option<i16>, label: Option<&str>) -> String {
    match (score, label) {
        (Some(s), Some(l)) => format!("{s} ({l})"),
        (Some(s), None) => s.to_string(),
        _ => EMPTY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_with_label_formats_missing_values() {
        assert_eq!(score_with_label(Some(2), Some("calm")), "2 (calm)");
        assert_eq!(score_with_label(Some(4), None), "4");
        assert_eq!(score_with_label(None, Some("calm")), EMPTY);
    }
}
